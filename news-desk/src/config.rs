use crate::types::{PipelineConfig, PipelineError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const LOCATION_TERMS: &[&str] = &[
    "espírito santo", "es ", " es ", "capixaba", "vitória", "vila velha", "serra", "cariacica",
    "viana", "guarapari", "fundão", "cachoeiro", "itapemirim", "marataízes", "castelo", "iconha",
    "piúma", "linhares", "colatina", "são mateus", "aracruz", "nova venécia",
    "barra de são francisco", "santa maria de jetibá", "domingos martins", "venda nova",
    "afonso cláudio", "guacui", "alegre", "ibitirama", "iúna", "br-101", "br-262",
    "rodovia do sol", "terceira ponte",
];

const SECURITY_TERMS: &[&str] = &[
    "polícia", "policia", "militar", "civil", "federal", "rodoviária", "prf", "pmes", "pces",
    "guarda", "agente", "bombeiro", "delegado", "comandante", "perito", "crime", "criminoso",
    "preso", "prisão", "detido", "apreensão", "apreendido", "droga", "entorpecente", "cocaína",
    "maconha", "crack", "tráfico", "traficante", "arma", "revólver", "pistola", "fuzil",
    "munição", "tiro", "tiroteio", "baleado", "homicídio", "assassinato", "morto", "morte",
    "corpo", "cadáver", "vítima", "roubo", "furto", "assalto", "latrocínio", "sequestro",
    "extorsão", "agressão", "espancamento", "maria da penha", "estupro", "abuso", "feminicídio",
    "operação", "investigação", "inquérito", "delegacia", "batalhão", "dp", "boletim", "justiça",
    "juiz", "tribunal", "mpes", "ministério público", "denúncia", "viatura", "mandado",
    "busca e apreensão", "flagrante", "segurança pública", "defesa social", "sesp", "secretaria",
    "secretário", "governo", "governador", "investimento", "recurso", "verba",
    "videomonitoramento", "cerco inteligente", "tecnologia", "inteligência", "estatística",
    "dados", "balanço", "redução", "aumento", "índice", "projeto", "social", "prevenção",
    "cidadania", "presídio",
];

const BLACKLIST: &[&str] = &[
    "horóscopo", "futebol", "campeonato", "novela", "bbb", "reality", "promoção", "black friday",
    "oferta", "show", "agenda cultural", "receita", "gastronomia", "turismo", "brasileirão",
    "copa", "jogo", "previsão do tempo", "resumo da novela", "fofoca", "bolsonaro", "lula",
    "michelle", "janja", "planalto", "brasília", "stf", "congresso", "câmara dos deputados",
    "senado", "ministro", "eleições 2026", "partido liberal", "pt ", "pl ", "concurso", "edital",
    "vaga", "processo seletivo", "inscrições", "estágio", "trainee", "emprego", "sine",
    "currículo", "vestibular",
];

const LOCAL_SOURCES: &[&str] = &[
    "gazeta", "tribuna", "folha vitória", "aquinoticias", "jornal fato", "es hoje",
];

/// Lexical relevance configuration. Built once at start-up and shared
/// read-only for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSets {
    pub blacklist: Vec<String>,
    pub security_terms: Vec<String>,
    pub location_terms: Vec<String>,
    pub local_sources: Vec<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            blacklist: owned(BLACKLIST),
            security_terms: owned(SECURITY_TERMS),
            location_terms: owned(LOCATION_TERMS),
            local_sources: owned(LOCAL_SOURCES),
        }
    }
}

impl KeywordSets {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let sets: KeywordSets = read_json(path.as_ref())?;
        let sets = sets.lowercased();
        if sets.security_terms.is_empty() {
            return Err(PipelineError::Config(format!(
                "{}: security_terms must not be empty",
                path.as_ref().display()
            )));
        }

        info!(
            "Loaded keyword sets from {} ({} blacklist, {} security, {} location, {} local sources)",
            path.as_ref().display(),
            sets.blacklist.len(),
            sets.security_terms.len(),
            sets.location_terms.len(),
            sets.local_sources.len()
        );
        Ok(sets)
    }

    /// Matching runs on lowercased text, so the terms must be lowercase too.
    /// Blank terms are dropped; surrounding spaces are significant ("es ")
    /// and kept.
    pub fn lowercased(self) -> Self {
        let lower = |terms: Vec<String>| -> Vec<String> {
            terms
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .map(|t| t.to_lowercase())
                .collect()
        };

        Self {
            blacklist: lower(self.blacklist),
            security_terms: lower(self.security_terms),
            location_terms: lower(self.location_terms),
            local_sources: lower(self.local_sources),
        }
    }

    /// Whether `lowercased` would leave the sets unchanged.
    pub fn is_lowercased(&self) -> bool {
        [&self.blacklist, &self.security_terms, &self.location_terms, &self.local_sources]
            .iter()
            .flat_map(|terms| terms.iter())
            .all(|t| !t.trim().is_empty() && *t == t.to_lowercase())
    }
}

impl PipelineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: PipelineConfig = read_json(path.as_ref())?;
        if config.relays.is_empty() {
            return Err(PipelineError::Config(format!(
                "{}: relays must not be empty",
                path.as_ref().display()
            )));
        }

        info!("Loaded pipeline config from {}", path.as_ref().display());
        Ok(config)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}
