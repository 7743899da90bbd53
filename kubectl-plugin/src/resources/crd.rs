//! Typed mirrors of the cStor custom resources read by the plugin.
//!
//! Only the fields the plugin reports on are modelled. Every field is defaulted so that objects
//! written by older or newer cStor operators still decode.
//! The cStor resources carry `versionDetails` next to `spec` and `status`, which the
//! `CustomResource` derive cannot express, so the resource traits are implemented by hand.

use crate::resources::constant::{
    CSTOR_VERSION, PERSISTENT_VOLUME_LABEL, POOL_CLUSTER_LABEL, POOL_INSTANCE_LABEL,
};
use k8s_openapi::apimachinery::pkg::{api::resource::Quantity, apis::meta::v1::ObjectMeta};
use serde::{Deserialize, Serialize};

/// Implements the k8s-openapi resource traits, which in turn gives us `kube::Resource`.
macro_rules! cstor_resource {
    ($kind:ident, $plural:literal) => {
        impl k8s_openapi::Resource for $kind {
            const API_VERSION: &'static str = $crate::cstor_group!("v1");
            const GROUP: &'static str = $crate::cstor_group!();
            const KIND: &'static str = stringify!($kind);
            const VERSION: &'static str = CSTOR_VERSION;
            const URL_PATH_SEGMENT: &'static str = $plural;
            type Scope = k8s_openapi::NamespaceResourceScope;
        }

        impl k8s_openapi::Metadata for $kind {
            type Ty = ObjectMeta;
            fn metadata(&self) -> &ObjectMeta {
                &self.metadata
            }
            fn metadata_mut(&mut self) -> &mut ObjectMeta {
                &mut self.metadata
            }
        }

        impl $kind {
            /// Name of the resource, empty if the object carries none.
            pub fn name(&self) -> &str {
                self.metadata.name.as_deref().unwrap_or_default()
            }
            /// Value of the given label, if present.
            pub fn label(&self, key: &str) -> Option<&str> {
                self.metadata
                    .labels
                    .as_ref()
                    .and_then(|labels| labels.get(key))
                    .map(String::as_str)
            }
        }
    };
}

/// The cStor volume, a.k.a the target.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolume {
    pub metadata: ObjectMeta,
    pub spec: CStorVolumeSpec,
    pub status: CStorVolumeStatus,
    pub version_details: VersionDetails,
}
cstor_resource!(CStorVolume, "cstorvolumes");

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeSpec {
    /// Desired capacity of the volume.
    pub capacity: Option<Quantity>,
    #[serde(rename = "targetIP")]
    pub target_ip: String,
    pub target_port: String,
    /// iSCSI qualified name of the target.
    pub iqn: String,
    pub target_portal: String,
    /// Number of replicas the volume is declared with.
    pub replication_factor: i32,
    pub consistency_factor: i32,
    pub desired_replication_factor: i32,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeStatus {
    /// Phase of the target, eg: `Healthy`, `Degraded`, `Offline`.
    pub phase: String,
    pub replica_statuses: Vec<ReplicaStatus>,
    /// Capacity reported by the target.
    pub capacity: Option<Quantity>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaStatus {
    pub replica_id: String,
    pub mode: String,
}

/// Running and desired version of a cStor resource.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionDetails {
    pub auto_upgrade: bool,
    pub desired: String,
    pub status: VersionStatus,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionStatus {
    pub dependents_upgraded: bool,
    pub current: String,
    /// Reconciliation state, eg: `Reconciled`, `ReconcilePending`.
    pub state: String,
    pub message: String,
    pub reason: String,
}

/// A single data replica of a cStor volume, hosted by a pool instance.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeReplica {
    pub metadata: ObjectMeta,
    pub spec: CStorVolumeReplicaSpec,
    pub status: CStorVolumeReplicaStatus,
    pub version_details: VersionDetails,
}
cstor_resource!(CStorVolumeReplica, "cstorvolumereplicas");

impl CStorVolumeReplica {
    /// The pool instance which owns this replica.
    pub fn pool_instance(&self) -> Option<&str> {
        self.label(POOL_INSTANCE_LABEL)
    }
    /// The persistent volume this replica belongs to.
    pub fn persistent_volume(&self) -> Option<&str> {
        self.label(PERSISTENT_VOLUME_LABEL)
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeReplicaSpec {
    #[serde(rename = "targetIP")]
    pub target_ip: String,
    pub capacity: String,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeReplicaStatus {
    /// Phase of the replica, eg: `Healthy`, `Offline`, `Recreate`.
    pub phase: String,
    pub capacity: ReplicaCapacity,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaCapacity {
    pub total: String,
    pub used: String,
}

/// Provisioning configuration of a cStor volume.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeConfig {
    pub metadata: ObjectMeta,
    pub spec: CStorVolumeConfigSpec,
    pub status: CStorVolumeConfigStatus,
    pub version_details: VersionDetails,
}
cstor_resource!(CStorVolumeConfig, "cstorvolumeconfigs");

impl CStorVolumeConfig {
    /// The pool cluster the volume is provisioned on.
    pub fn pool_cluster(&self) -> Option<&str> {
        self.label(POOL_CLUSTER_LABEL)
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeConfigSpec {
    pub capacity: Option<Quantity>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CStorVolumeConfigStatus {
    /// Phase of the config, eg: `Pending`, `Bound`.
    pub phase: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn cstor_volume_from_api_json() {
        let volume: CStorVolume = serde_json::from_value(serde_json::json!({
            "apiVersion": "cstor.openebs.io/v1",
            "kind": "CStorVolume",
            "metadata": {
                "name": "pvc-b1b3f5d4",
                "namespace": "openebs",
                "labels": { "openebs.io/persistent-volume": "pvc-b1b3f5d4" }
            },
            "spec": {
                "capacity": "5Gi",
                "iqn": "iqn.2016-09.com.openebs.cstor:pvc-b1b3f5d4",
                "targetIP": "10.0.0.12",
                "targetPortal": "10.0.0.12:3260",
                "targetPort": "3260",
                "replicationFactor": 3,
                "consistencyFactor": 2
            },
            "status": {
                "phase": "Healthy",
                "capacity": "5Gi",
                "replicaStatuses": [{ "replicaId": "5523611450015704000", "mode": "Healthy" }]
            },
            "versionDetails": {
                "autoUpgrade": false,
                "desired": "3.5.0",
                "status": { "current": "3.5.0", "state": "Reconciled", "dependentsUpgraded": true }
            }
        }))
        .unwrap();

        assert_eq!(volume.name(), "pvc-b1b3f5d4");
        assert_eq!(volume.spec.target_ip, "10.0.0.12");
        assert_eq!(volume.spec.replication_factor, 3);
        assert_eq!(volume.status.replica_statuses.len(), 1);
        assert_eq!(volume.status.capacity, Some(Quantity("5Gi".to_string())));
        assert_eq!(volume.version_details.status.state, "Reconciled");
        assert_eq!(volume.label(PERSISTENT_VOLUME_LABEL), Some("pvc-b1b3f5d4"));
    }

    #[test]
    fn partial_replica_decodes() {
        let replica: CStorVolumeReplica = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "pvc-b1b3f5d4-cstor-pool-x7k2" }
        }))
        .unwrap();
        assert_eq!(replica.name(), "pvc-b1b3f5d4-cstor-pool-x7k2");
        assert_eq!(replica.pool_instance(), None);
        assert!(replica.status.phase.is_empty());
    }

    #[test]
    fn resource_urls() {
        assert_eq!(CStorVolume::kind(&()), "CStorVolume");
        assert_eq!(CStorVolume::api_version(&()), "cstor.openebs.io/v1");
        assert_eq!(CStorVolumeReplica::plural(&()), "cstorvolumereplicas");
        assert_eq!(
            CStorVolumeConfig::url_path(&(), Some("openebs")),
            "/apis/cstor.openebs.io/v1/namespaces/openebs/cstorvolumeconfigs"
        );
    }
}
