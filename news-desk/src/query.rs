use crate::types::{FeedLocale, Result, SearchWindow};
use crate::utils::time;
use url::Url;

/// Recency filter used when the window has no bounds.
pub const DEFAULT_TIME_FILTER: &str = "when:2d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    pub name: String,
    pub expression: String,
}

impl QueryTemplate {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }

    pub fn render(&self, time_filter: &str) -> String {
        format!("{} {}", self.expression, time_filter)
    }
}

/// The fixed query set, in dispatch order. Dedup favours earlier entries.
pub fn default_templates() -> Vec<QueryTemplate> {
    let site = |domain: &str| {
        QueryTemplate::new(
            format!("site:{}", domain),
            format!("site:{} (\"polícia\" OR \"crime\" OR \"segurança\")", domain),
        )
    };

    vec![
        QueryTemplate::new(
            "institutions",
            "(Polícia Militar OR PMES OR Polícia Civil OR PCES OR PRF OR \"Força Nacional\") \"Espírito Santo\"",
        ),
        QueryTemplate::new(
            "crime-terms",
            "(Homicídio OR Tráfico OR Apreensão OR \"Operação Policial\") \"Espírito Santo\"",
        ),
        QueryTemplate::new(
            "security-bodies",
            "(\"Guarda Municipal\" OR SESP OR \"Secretaria de Segurança\") \"Espírito Santo\"",
        ),
        site("agazeta.com.br"),
        site("folhavitoria.com.br"),
        site("tribunaonline.com.br"),
    ]
}

/// `after:`/`before:` tokens for an explicit window, `when:2d` otherwise.
pub fn time_filter(window: &SearchWindow) -> String {
    if window.is_unbounded() {
        return DEFAULT_TIME_FILTER.to_string();
    }

    let mut tokens = Vec::new();
    if let Some(start) = window.start {
        tokens.push(format!("after:{}", time::query_after(start)));
    }
    if let Some(end) = window.end {
        tokens.push(format!("before:{}", time::query_before(end)));
    }
    tokens.join(" ")
}

pub fn search_url(base: &str, locale: &FeedLocale, query: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        base,
        &[
            ("q", query),
            ("hl", locale.hl.as_str()),
            ("gl", locale.gl.as_str()),
            ("ceid", locale.ceid.as_str()),
        ],
    )?;
    Ok(url)
}
