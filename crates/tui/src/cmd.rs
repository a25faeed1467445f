//! # Command Execution Layer
//!
//! The boundary where the selector's pure state updates meet the network.
//! Each [`Effect`] becomes a Tokio task that calls the directory or the
//! settings store and sends the outcome back as a [`Msg`].
//!
//! Recency updates are read-modify-write without a version check: a single
//! writer per user is assumed. The write itself is fire-and-forget.

use std::sync::Arc;

use anyhow::{Context, Result};
use fulfillers_api::{CustomizrClient, FetchOptions, FulfillerDirectory, FulfillerIdentityClient, UserSettingsStore};
use fulfillers_types::SettingsUpdate;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{JoinHandle, spawn};
use tracing::{debug, warn};

use crate::app::{Effect, Msg};

/// Remote collaborators the effects run against.
#[derive(Clone)]
pub struct Services {
    pub directory: Arc<dyn FulfillerDirectory>,
    pub settings: Arc<dyn UserSettingsStore>,
}

impl Services {
    pub fn new(directory: Arc<dyn FulfillerDirectory>, settings: Arc<dyn UserSettingsStore>) -> Self {
        Self { directory, settings }
    }

    /// HTTP clients configured from the environment.
    pub fn from_env() -> Result<Self> {
        let directory = FulfillerIdentityClient::from_env().context("configuring the fulfiller directory client")?;
        let settings = CustomizrClient::from_env().context("configuring the settings client")?;
        Ok(Self::new(Arc::new(directory), Arc::new(settings)))
    }
}

/// Spawn one task per effect. The handles complete once the outcome has
/// been sent; a detached settings write may still be running.
pub fn run_effects(services: &Services, sender: &UnboundedSender<Msg>, effects: Vec<Effect>) -> Vec<JoinHandle<()>> {
    effects
        .into_iter()
        .map(|effect| {
            let services = services.clone();
            let sender = sender.clone();
            spawn(async move {
                let msg = execute(&services, effect).await;
                if sender.send(msg).is_err() {
                    debug!("selector receiver dropped; discarding result");
                }
            })
        })
        .collect()
}

async fn execute(services: &Services, effect: Effect) -> Msg {
    match effect {
        Effect::FetchCatalog {
            mount,
            sequence,
            access_token,
            include_archived,
        } => {
            let result = services
                .directory
                .fetch_fulfillers(&access_token, FetchOptions { include_archived })
                .await;
            Msg::CatalogLoaded { mount, sequence, result }
        }
        Effect::LoadRecency {
            mount,
            sequence,
            access_token,
        } => {
            let result = services
                .settings
                .get_settings(&access_token)
                .await
                .map(|settings| settings.recent_fulfiller_ids);
            Msg::RecencyLoaded {
                mount,
                sequence,
                access_token,
                result,
            }
        }
        Effect::UpdateRecency {
            mount,
            sequence,
            access_token,
            fulfiller_id,
            limit,
        } => {
            let result = match services.settings.get_settings(&access_token).await {
                Ok(settings) => {
                    let promoted = settings.recent_fulfiller_ids.promoted(&fulfiller_id, limit);
                    let update = SettingsUpdate::recent_fulfiller_ids(promoted.clone());
                    persist_recency(services.settings.clone(), access_token.clone(), update);
                    Ok(promoted)
                }
                Err(err) => Err(err),
            };
            Msg::RecencyUpdated {
                mount,
                sequence,
                access_token,
                result,
            }
        }
    }
}

fn persist_recency(settings: Arc<dyn UserSettingsStore>, access_token: String, update: SettingsUpdate) {
    spawn(async move {
        if let Err(err) = settings.put_settings(&access_token, &update).await {
            warn!(error = %err, "failed to persist recent fulfillers");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FulfillerSelect;
    use crate::ui::components::selector::SelectorProps;
    use async_trait::async_trait;
    use fulfillers_api::{DirectoryError, InMemorySettingsStore, SettingsError};
    use fulfillers_types::{Fulfiller, FulfillerCatalog, RecencyList, UserSettings};
    use fulfillers_util::Localizer;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct StaticDirectory(Result<Vec<Fulfiller>, u16>);

    #[async_trait]
    impl FulfillerDirectory for StaticDirectory {
        async fn fetch_fulfillers(&self, _: &str, options: FetchOptions) -> Result<FulfillerCatalog, DirectoryError> {
            match &self.0 {
                Ok(fulfillers) => Ok(fulfillers
                    .iter()
                    .filter(|fulfiller| options.include_archived || !fulfiller.archived)
                    .cloned()
                    .collect::<Vec<_>>()
                    .into()),
                Err(status) => Err(DirectoryError::Status {
                    status: *status,
                    message: "directory unavailable".into(),
                }),
            }
        }
    }

    struct BrokenSettings;

    #[async_trait]
    impl UserSettingsStore for BrokenSettings {
        async fn get_settings(&self, _: &str) -> Result<UserSettings, SettingsError> {
            Err(SettingsError::Network("offline".into()))
        }

        async fn put_settings(&self, _: &str, _: &SettingsUpdate) -> Result<(), SettingsError> {
            Err(SettingsError::Network("offline".into()))
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn recency(ids: &[&str]) -> RecencyList {
        RecencyList::new(ids.iter().map(|id| id.to_string()).collect())
    }

    async fn drain(select: &mut FulfillerSelect, services: &Services, effects: Vec<Effect>) {
        init_tracing();
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut pending = run_effects(services, &sender, effects).len();
        while pending > 0 {
            let msg = receiver.recv().await.unwrap();
            pending -= 1;
            let next = select.update(msg);
            pending += run_effects(services, &sender, next).len();
        }
    }

    #[tokio::test]
    async fn mount_loads_catalog_and_recency() {
        let store = Arc::new(InMemorySettingsStore::new().with_settings(
            "tok",
            UserSettings {
                recent_fulfiller_ids: recency(&["b"]),
            },
        ));
        let services = Services::new(
            Arc::new(StaticDirectory(Ok(vec![
                Fulfiller::new("b", 2, "Beta"),
                Fulfiller::new("a", 1, "Alpha"),
                Fulfiller::new("z", 9, "Zulu").archived(true),
            ]))),
            store,
        );
        let mut select = FulfillerSelect::new(SelectorProps::default().with_access_token("tok"), Localizer::shared());

        let effects = select.mount();
        drain(&mut select, &services, effects).await;

        let ids: Vec<_> = select.options().into_iter().filter_map(|option| option.fulfiller_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(select.state().recency(), &recency(&["b"]));
    }

    #[tokio::test]
    async fn directory_failure_shows_error_entry() {
        let services = Services::new(Arc::new(StaticDirectory(Err(503))), Arc::new(InMemorySettingsStore::new()));
        let mut select = FulfillerSelect::new(SelectorProps::default().with_access_token("tok"), Localizer::shared());

        let effects = select.mount();
        drain(&mut select, &services, effects).await;

        let options = select.options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].text(), "directory unavailable");
    }

    #[tokio::test]
    async fn selection_promotes_and_persists_recency() {
        let store = Arc::new(InMemorySettingsStore::new().with_settings(
            "tok",
            UserSettings {
                recent_fulfiller_ids: recency(&["a", "b", "c"]),
            },
        ));
        let services = Services::new(Arc::new(StaticDirectory(Ok(Vec::new()))), store.clone());
        let props = SelectorProps::default()
            .with_access_token("tok")
            .with_fulfillers(vec![Fulfiller::new("b", 2, "Beta")]);
        let mut select = FulfillerSelect::new(props, Localizer::shared());
        let effects = select.mount();
        drain(&mut select, &services, effects).await;

        let effects = select.select(&Fulfiller::new("b", 2, "Beta").composite_key()).unwrap();
        drain(&mut select, &services, effects).await;
        assert_eq!(select.state().recency(), &recency(&["b", "a", "c"]));

        // The write is detached; give it a moment to land.
        for _ in 0..50 {
            if store.get_settings("tok").await.unwrap().recent_fulfiller_ids == recency(&["b", "a", "c"]) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("recency update was not persisted");
    }

    #[tokio::test]
    async fn failed_recency_reload_leaves_list_untouched() {
        let services = Services::new(Arc::new(StaticDirectory(Ok(Vec::new()))), Arc::new(BrokenSettings));
        let props = SelectorProps::default()
            .with_access_token("tok")
            .with_fulfillers(vec![Fulfiller::new("b", 2, "Beta")]);
        let mut select = FulfillerSelect::new(props, Localizer::shared());
        let effects = select.mount();
        drain(&mut select, &services, effects).await;

        let effects = select.select(&Fulfiller::new("b", 2, "Beta").composite_key()).unwrap();
        drain(&mut select, &services, effects).await;

        assert!(select.state().recency().is_empty());
        assert_eq!(select.state().selected_id(), Some("b"));
    }

    #[tokio::test]
    async fn recency_is_capped() {
        let store = Arc::new(InMemorySettingsStore::new().with_settings(
            "tok",
            UserSettings {
                recent_fulfiller_ids: recency(&["a", "b", "c"]),
            },
        ));
        let services = Services::new(Arc::new(StaticDirectory(Ok(Vec::new()))), store);
        let props = SelectorProps::default()
            .with_access_token("tok")
            .with_fulfillers(vec![Fulfiller::new("d", 4, "Delta")])
            .with_recent_limit(2);
        let mut select = FulfillerSelect::new(props, Localizer::shared());
        select.mount();

        let effects = select.select(&Fulfiller::new("d", 4, "Delta").composite_key()).unwrap();
        drain(&mut select, &services, effects).await;
        assert_eq!(select.state().recency(), &recency(&["d", "a"]));
    }
}
