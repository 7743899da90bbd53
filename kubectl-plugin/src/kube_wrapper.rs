use crate::resources::{
    constant::{PAGINATION_LIMIT, PERSISTENT_VOLUME_LABEL, TARGET_LABEL, TARGET_LABEL_VALUE},
    crd::{CStorVolume, CStorVolumeConfig, CStorVolumeReplica},
    error::{Error, KubeClientSnafu, KubeConfigInferSnafu, KubeConfigReadSnafu},
};
use async_trait::async_trait;
use k8s_openapi::api::{
    core::v1::{PersistentVolume, Pod},
    storage::v1::VolumeAttachment,
};
use kube::{api::ListParams, Api, Client};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::{convert::TryFrom, fmt::Debug, path::PathBuf, time::Duration};

/// The cluster objects the volume commands read from.
/// Every call is a single sequential read, no retries are attempted.
#[async_trait(?Send)]
pub trait ClusterSource {
    /// List all cStor volumes in the namespace.
    async fn list_volumes(&self, namespace: &str) -> Result<Vec<CStorVolume>, kube::Error>;
    /// Get the cStor volume with the given name, `None` if it does not exist.
    async fn get_volume(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<CStorVolume>, kube::Error>;
    /// List all persistent volumes.
    async fn list_persistent_volumes(&self) -> Result<Vec<PersistentVolume>, kube::Error>;
    /// List all CSI volume attachments.
    async fn list_volume_attachments(&self) -> Result<Vec<VolumeAttachment>, kube::Error>;
    /// Get the persistent volume with the given name, `None` if it does not exist.
    async fn get_persistent_volume(
        &self,
        name: &str,
    ) -> Result<Option<PersistentVolume>, kube::Error>;
    /// Get the cStor volume config with the given name, `None` if it does not exist.
    async fn get_volume_config(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<CStorVolumeConfig>, kube::Error>;
    /// Get the node the target of the given volume is scheduled on, `None` if there is no
    /// target pod.
    async fn get_target_node(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<String>, kube::Error>;
    /// List the replicas of the given volume.
    async fn list_volume_replicas(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Vec<CStorVolumeReplica>, kube::Error>;
}

/// ClientSet is a wrapper over the Kubernetes client.
#[derive(Clone)]
pub struct ClientSet {
    client: kube::Client,
}

impl ClientSet {
    /// Create a new ClientSet, from the config file if provided, otherwise with default.
    pub async fn new(kube_config_path: Option<PathBuf>, timeout: Duration) -> Result<Self, Error> {
        let mut config = match kube_config_path {
            Some(config_path) => {
                let kube_config = kube::config::Kubeconfig::read_from(&config_path)
                    .context(KubeConfigReadSnafu {
                        path: config_path.clone(),
                    })?;
                kube::Config::from_custom_kubeconfig(kube_config, &Default::default())
                    .await
                    .context(KubeConfigReadSnafu { path: config_path })?
            }
            None => kube::Config::infer().await.context(KubeConfigInferSnafu)?,
        };
        config.connect_timeout = Some(timeout);
        config.read_timeout = Some(timeout);
        let client = Client::try_from(config).context(KubeClientSnafu)?;
        Ok(Self { client })
    }

    /// Get a clone of the inner `kube::Client`.
    pub fn kube_client(&self) -> kube::Client {
        self.client.clone()
    }
}

/// List all objects matching the parameters, `PAGINATION_LIMIT` objects at a time.
async fn list_paginated<K>(api: &Api<K>, list_params: ListParams) -> Result<Vec<K>, kube::Error>
where
    K: Clone + DeserializeOwned + Debug,
{
    let mut list_params = list_params.limit(PAGINATION_LIMIT);
    let mut items = Vec::new();
    loop {
        let mut result = api.list(&list_params).await?;
        items.append(&mut result.items);
        match result.metadata.continue_ {
            Some(token) if !token.is_empty() => {
                list_params = list_params.continue_token(token.as_str())
            }
            _ => break,
        };
    }
    Ok(items)
}

fn volume_selector(name: &str) -> String {
    format!("{PERSISTENT_VOLUME_LABEL}={name}")
}

#[async_trait(?Send)]
impl ClusterSource for ClientSet {
    async fn list_volumes(&self, namespace: &str) -> Result<Vec<CStorVolume>, kube::Error> {
        let volumes: Api<CStorVolume> = Api::namespaced(self.kube_client(), namespace);
        list_paginated(&volumes, ListParams::default()).await
    }

    async fn get_volume(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<CStorVolume>, kube::Error> {
        let volumes: Api<CStorVolume> = Api::namespaced(self.kube_client(), namespace);
        volumes.get_opt(name).await
    }

    async fn list_persistent_volumes(&self) -> Result<Vec<PersistentVolume>, kube::Error> {
        let pvs: Api<PersistentVolume> = Api::all(self.kube_client());
        list_paginated(&pvs, ListParams::default()).await
    }

    async fn list_volume_attachments(&self) -> Result<Vec<VolumeAttachment>, kube::Error> {
        let attachments: Api<VolumeAttachment> = Api::all(self.kube_client());
        list_paginated(&attachments, ListParams::default()).await
    }

    async fn get_persistent_volume(
        &self,
        name: &str,
    ) -> Result<Option<PersistentVolume>, kube::Error> {
        let pvs: Api<PersistentVolume> = Api::all(self.kube_client());
        pvs.get_opt(name).await
    }

    async fn get_volume_config(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<CStorVolumeConfig>, kube::Error> {
        let configs: Api<CStorVolumeConfig> = Api::namespaced(self.kube_client(), namespace);
        configs.get_opt(name).await
    }

    async fn get_target_node(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<String>, kube::Error> {
        let pods: Api<Pod> = Api::namespaced(self.kube_client(), namespace);
        let selector = format!(
            "{},{TARGET_LABEL}={TARGET_LABEL_VALUE}",
            volume_selector(name)
        );
        let pods = pods.list(&ListParams::default().labels(&selector)).await?;
        Ok(pods
            .items
            .into_iter()
            .find_map(|pod| pod.spec.and_then(|spec| spec.node_name)))
    }

    async fn list_volume_replicas(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Vec<CStorVolumeReplica>, kube::Error> {
        let replicas: Api<CStorVolumeReplica> = Api::namespaced(self.kube_client(), namespace);
        let list_params = ListParams::default().labels(&volume_selector(name));
        list_paginated(&replicas, list_params).await
    }
}
