use crate::enrichment::LinkEnricher;
use crate::types::{EnrichmentOutcome, EnrichmentState, ResultItem, SelectedRecord};
use crate::utils::url::canonical_link;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

const CONTENT_EDIT_HINT: &str = "(Edite para colar o texto completo da matéria, se necessário.)";

/// Result of toggling a search hit.
#[derive(Debug)]
pub enum Selection {
    /// A new record was created and its enrichment task started.
    Selected { id: Uuid, task: JoinHandle<()> },
    Deselected,
}

/// The user's report: selected records keyed by canonical link.
///
/// Enrichment tasks write back through `apply_enrichment`, which matches on
/// both key and record id, so a record removed (or removed and re-selected)
/// while its task is running never receives a stale update.
#[derive(Clone)]
pub struct ReportState {
    records: Arc<RwLock<HashMap<String, SelectedRecord>>>,
    next_position: Arc<AtomicU64>,
    enricher: Arc<LinkEnricher>,
}

impl ReportState {
    pub fn new(enricher: Arc<LinkEnricher>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_position: Arc::new(AtomicU64::new(0)),
            enricher,
        }
    }

    /// Select `item`, or deselect it if it is already in the report.
    pub async fn toggle(&self, item: &ResultItem) -> Selection {
        let key = canonical_link(&item.link);
        let mut records = self.records.write().await;

        let existing = records
            .values()
            .find(|r| r.key == key || r.link == item.link || r.original_link == item.link)
            .map(|r| r.key.clone());
        if let Some(existing) = existing {
            records.remove(&existing);
            info!("Deselected {}", existing);
            return Selection::Deselected;
        }

        let record = SelectedRecord {
            id: Uuid::new_v4(),
            key: key.clone(),
            title: item.title.clone(),
            source: item.source.clone(),
            summary: item.snippet.clone(),
            content: format!("{}\n\n{}", item.snippet, CONTENT_EDIT_HINT),
            link: item.link.clone(),
            original_link: item.link.clone(),
            date: item.pub_date,
            position: self.next_position.fetch_add(1, Ordering::Relaxed),
            state: EnrichmentState::Pending,
        };
        let id = record.id;
        let link = record.link.clone();
        records.insert(key.clone(), record);
        drop(records);

        info!("Selected {} ({})", key, id);
        let task = self.spawn_enrichment(key, id, link);
        Selection::Selected { id, task }
    }

    fn spawn_enrichment(&self, key: String, id: Uuid, link: String) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let outcome = state.enricher.enrich(&link).await;
            if !state.apply_enrichment(&key, id, outcome).await {
                debug!("Dropped enrichment result for {} ({}), record is gone", key, id);
            }
        })
    }

    /// Update-if-present. Returns whether a record was changed.
    pub async fn apply_enrichment(&self, key: &str, id: Uuid, outcome: EnrichmentOutcome) -> bool {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(key) else {
            return false;
        };
        if record.id != id || record.state.is_settled() {
            return false;
        }

        match outcome {
            EnrichmentOutcome::Resolved(link) => {
                record.link = link;
                record.state = EnrichmentState::Resolved;
            }
            EnrichmentOutcome::Failed => {
                record.state = EnrichmentState::Failed;
            }
        }
        true
    }

    pub async fn is_selected(&self, link: &str) -> bool {
        let key = canonical_link(link);
        let records = self.records.read().await;
        records
            .values()
            .any(|r| r.key == key || r.link == link || r.original_link == link)
    }

    pub async fn get(&self, key: &str) -> Option<SelectedRecord> {
        self.records.read().await.get(key).cloned()
    }

    /// All records in selection order.
    pub async fn records(&self) -> Vec<SelectedRecord> {
        let mut records: Vec<SelectedRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.position);
        records
    }

    /// Records dated `date`, in selection order.
    pub async fn records_on(&self, date: NaiveDate) -> Vec<SelectedRecord> {
        self.records()
            .await
            .into_iter()
            .filter(|r| r.date == date)
            .collect()
    }

    pub async fn remove(&self, key: &str) -> Option<SelectedRecord> {
        self.records.write().await.remove(key)
    }

    pub async fn clear(&self) {
        let mut records = self.records.write().await;
        info!("Clearing report with {} records", records.len());
        records.clear();
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
