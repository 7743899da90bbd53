/// macros to define group used in the cstor crds.
#[macro_export]
macro_rules! cstor_group {
    () => {
        "cstor.openebs.io"
    };
    ($s:literal) => {
        concat!($crate::cstor_group!(), "/", $s)
    };
}

/// Version of the cstor crds.
pub(crate) const CSTOR_VERSION: &str = "v1";
/// The volume type reported for cstor volumes.
pub(crate) const CSTOR_VOLUME_TYPE: &str = "cstor";

/// Label carrying the persistent volume name on replicas and target pods.
pub(crate) const PERSISTENT_VOLUME_LABEL: &str = "openebs.io/persistent-volume";
/// Label carrying the pool instance which owns a volume replica.
pub(crate) const POOL_INSTANCE_LABEL: &str = "cstorpoolinstance.openebs.io/name";
/// Label carrying the pool cluster a volume config belongs to.
pub(crate) const POOL_CLUSTER_LABEL: &str = "cstorpoolcluster.openebs.io/name";
/// Label key and value of the cstor target pods.
pub(crate) const TARGET_LABEL: &str = "openebs.io/target";
pub(crate) const TARGET_LABEL_VALUE: &str = "cstor-target";

/// Reconciliation state of a volume whose running version is the desired one.
pub(crate) const RECONCILED_STATE: &str = "Reconciled";

/// Page size used when listing resources.
pub(crate) const PAGINATION_LIMIT: u32 = 100;

/// Message printed when the namespace has no volumes.
pub const NO_VOLUMES_MESSAGE: &str = "No Volumes are running";
/// Message printed when a volume has no replicas to show.
pub const NO_REPLICAS_MESSAGE: &str = "None of the replicas are running";

/// Template name of the volume details block.
pub(crate) const VOLUME_DETAILS: &str = "volume-details";
/// Template name of the portal details block.
pub(crate) const PORTAL_DETAILS: &str = "portal-details";

pub(crate) const VOLUME_DETAILS_TEMPLATE: &str = r#"Volume Details :
----------------
NAME            : {name}
ACCESS MODE     : {access_mode}
CSI DRIVER      : {csi_driver}
STORAGE CLASS   : {storage_class}
VOLUME PHASE    : {attachment_status}
VERSION         : {version}
CSPC            : {pool_cluster}
SIZE            : {capacity}
STATUS          : {status}
REPLICA COUNT   : {replica_count}
"#;

pub(crate) const PORTAL_DETAILS_TEMPLATE: &str = r#"Portal Details :
----------------
IQN              : {iqn}
VOLUME NAME      : {volume_name}
TARGET NODE NAME : {target_node_name}
PORTAL           : {portal}
TARGET IP        : {target_ip}
"#;

pub(crate) const REPLICA_DETAILS_HEADING: &str = "Replica Details :\n-----------------\n";
