use crate::{
    kube_wrapper::ClusterSource,
    operations::{Describe, List, PluginResult, Stats},
    resources::{
        constant::{
            CSTOR_VOLUME_TYPE, NO_REPLICAS_MESSAGE, NO_VOLUMES_MESSAGE, PORTAL_DETAILS,
            PORTAL_DETAILS_TEMPLATE, RECONCILED_STATE, REPLICA_DETAILS_HEADING, VOLUME_DETAILS,
            VOLUME_DETAILS_TEMPLATE,
        },
        crd::{CStorVolume, CStorVolumeConfig, CStorVolumeReplica, VersionDetails},
        error::{
            Error, GetPersistentVolumeSnafu, GetVolumeConfigSnafu, GetVolumeSnafu,
            ListPersistentVolumesSnafu, ListReplicasSnafu, ListVolumeAttachmentsSnafu,
            ListVolumesSnafu, VolumeNotFoundSnafu,
        },
        utils::{
            self, available_cell, render_template, CreateRows, GetHeaderRow, OutputFormat,
            COLUMN_SEPARATOR, NOT_AVAILABLE,
        },
        VolumeName,
    },
};
use async_trait::async_trait;
use k8s_openapi::{
    api::{core::v1::PersistentVolume, storage::v1::VolumeAttachment},
    apimachinery::pkg::api::resource::Quantity,
};
use serde::Serialize;
use snafu::{OptionExt, ResultExt};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use ::utils::DEFAULT_NAMESPACE;

/// Arguments of the `volume list` command.
#[derive(clap::Args, Debug, Clone)]
pub struct VolumeListArgs {
    /// Namespace of the cStor volume resources.
    #[clap(long, short = 'n', default_value = DEFAULT_NAMESPACE, env = "OPENEBS_NAMESPACE")]
    pub namespace: String,
}

/// Arguments of the `volume describe` command.
#[derive(clap::Args, Debug, Clone)]
pub struct VolumeDescribeArgs {
    /// Name of the volume.
    #[clap(long)]
    pub volname: VolumeName,
    /// Namespace of the cStor volume resources.
    #[clap(long, short = 'n', default_value = DEFAULT_NAMESPACE, env = "OPENEBS_NAMESPACE")]
    pub namespace: String,
}

/// Arguments of the `volume stats` command.
#[derive(clap::Args, Debug, Clone)]
pub struct VolumeStatsArgs {
    /// Name of the volume.
    #[clap(long)]
    pub volname: VolumeName,
}

/// A volume as displayed by the plugin, joined from the cStor volume and the objects which share
/// its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeRecord {
    pub name: String,
    pub namespace: String,
    pub node: String,
    pub csi_volume_attachment_name: String,
    /// Phase of the cStor volume.
    pub status: String,
    pub volume_type: String,
    pub version: String,
    pub capacity: String,
    pub storage_class: String,
    /// Phase of the persistent volume.
    pub attachment_status: String,
    pub access_mode: String,
    pub csi_driver: String,
    pub pool_cluster: String,
    pub replication_factor: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_count: Option<usize>,
    pub target_portal: String,
    pub target_ip: String,
    pub iqn: String,
}

/// A replica of a volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicaRecord {
    pub name: String,
    pub pool_instance: String,
    pub status: String,
}

/// The target portal of a volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalRecord {
    pub iqn: String,
    pub volume_name: String,
    pub portal: String,
    pub target_ip: String,
    pub target_node_name: String,
}

/// Everything `volume describe` reports about a volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeDescription {
    pub volume: VolumeRecord,
    pub portal: PortalRecord,
    pub replicas: Vec<ReplicaRecord>,
}

/// The fields of a volume sourced from its persistent volume and volume attachment.
#[derive(Debug, Clone, PartialEq)]
struct PersistentVolumeInfo {
    node: String,
    csi_volume_attachment_name: String,
    storage_class: String,
    attachment_status: String,
    access_mode: String,
    csi_driver: String,
}

impl PersistentVolumeInfo {
    fn new(pv: &PersistentVolume, attachment: Option<&VolumeAttachment>) -> Self {
        let spec = pv.spec.as_ref();
        Self {
            node: available_cell(attachment.map(|va| va.spec.node_name.as_str())),
            csi_volume_attachment_name: available_cell(
                attachment.and_then(|va| va.metadata.name.as_deref()),
            ),
            storage_class: available_cell(spec.and_then(|s| s.storage_class_name.as_deref())),
            attachment_status: available_cell(pv.status.as_ref().and_then(|s| s.phase.as_deref())),
            access_mode: available_cell(
                spec.and_then(|s| s.access_modes.as_ref())
                    .map(|modes| modes.join(",")),
            ),
            csi_driver: available_cell(
                spec.and_then(|s| s.csi.as_ref())
                    .map(|csi| csi.driver.as_str()),
            ),
        }
    }

    /// Used when the volume has no persistent volume.
    fn unavailable() -> Self {
        Self {
            node: NOT_AVAILABLE.to_string(),
            csi_volume_attachment_name: NOT_AVAILABLE.to_string(),
            storage_class: NOT_AVAILABLE.to_string(),
            attachment_status: NOT_AVAILABLE.to_string(),
            access_mode: NOT_AVAILABLE.to_string(),
            csi_driver: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Formats the version of a volume, annotated with the reconciliation state unless the volume
/// is reconciled.
pub fn format_version(state: &str, current: &str, desired: &str) -> String {
    if state.is_empty() || state == RECONCILED_STATE {
        current.to_string()
    } else {
        format!("{state}, desired version {desired}")
    }
}

fn version_of(details: &VersionDetails) -> String {
    format_version(
        &details.status.state,
        &details.status.current,
        &details.desired,
    )
}

/// Reported capacity of the volume, or the requested one if the target reported none.
fn capacity_of(volume: &CStorVolume) -> String {
    fn reported(capacity: &Option<Quantity>) -> Option<&str> {
        capacity
            .as_ref()
            .map(|capacity| capacity.0.as_str())
            .filter(|capacity| !capacity.is_empty())
    }
    available_cell(reported(&volume.status.capacity).or_else(|| reported(&volume.spec.capacity)))
}

impl VolumeRecord {
    fn new(
        volume: &CStorVolume,
        namespace: &str,
        pv_info: PersistentVolumeInfo,
        pool_cluster: Option<&str>,
    ) -> Self {
        Self {
            name: volume.name().to_string(),
            namespace: volume
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| namespace.to_string()),
            node: pv_info.node,
            csi_volume_attachment_name: pv_info.csi_volume_attachment_name,
            status: available_cell(Some(&volume.status.phase)),
            volume_type: CSTOR_VOLUME_TYPE.to_string(),
            version: version_of(&volume.version_details),
            capacity: capacity_of(volume),
            storage_class: pv_info.storage_class,
            attachment_status: pv_info.attachment_status,
            access_mode: pv_info.access_mode,
            csi_driver: pv_info.csi_driver,
            pool_cluster: available_cell(pool_cluster),
            replication_factor: volume.spec.replication_factor,
            replica_count: None,
            target_portal: volume.spec.target_portal.clone(),
            target_ip: volume.spec.target_ip.clone(),
            iqn: volume.spec.iqn.clone(),
        }
    }

    /// Whether there are replicas to be shown for this volume.
    pub fn has_replicas(&self) -> bool {
        self.replication_factor > 0 && self.replica_count.unwrap_or_default() > 0
    }
}

impl From<&VolumeRecord> for PortalRecord {
    fn from(volume: &VolumeRecord) -> Self {
        Self {
            iqn: volume.iqn.clone(),
            volume_name: volume.name.clone(),
            portal: volume.target_portal.clone(),
            target_ip: volume.target_ip.clone(),
            target_node_name: volume.node.clone(),
        }
    }
}

impl From<&CStorVolumeReplica> for ReplicaRecord {
    fn from(replica: &CStorVolumeReplica) -> Self {
        Self {
            name: available_cell(Some(replica.name())),
            pool_instance: available_cell(replica.pool_instance()),
            status: available_cell(Some(&replica.status.phase)),
        }
    }
}

/// Replica records unique by name, in the order the replicas were retrieved.
fn replica_records(replicas: &[CStorVolumeReplica]) -> Vec<ReplicaRecord> {
    let mut names = HashSet::new();
    replicas
        .iter()
        .filter(|replica| names.insert(replica.name()))
        .map(ReplicaRecord::from)
        .collect()
}

/// Map of persistent volume name to the fields sourced from it and its volume attachment.
async fn persistent_volume_info<S>(
    source: &S,
) -> Result<HashMap<String, PersistentVolumeInfo>, Error>
where
    S: ClusterSource + ?Sized,
{
    let pvs = source
        .list_persistent_volumes()
        .await
        .context(ListPersistentVolumesSnafu)?;
    let attachments = source
        .list_volume_attachments()
        .await
        .context(ListVolumeAttachmentsSnafu)?;
    let attachments: HashMap<&str, &VolumeAttachment> = attachments
        .iter()
        .filter_map(|va| {
            va.spec
                .source
                .persistent_volume_name
                .as_deref()
                .map(|pv| (pv, va))
        })
        .collect();

    Ok(pvs
        .iter()
        .filter_map(|pv| {
            let name = pv.metadata.name.as_deref()?;
            let info = PersistentVolumeInfo::new(pv, attachments.get(name).copied());
            Some((name.to_string(), info))
        })
        .collect())
}

/// List the volumes of the namespace, joined by name with their persistent volumes.
/// Volumes without a persistent volume are still listed, with `NOT_AVAILABLE` fields.
pub async fn list_volumes<S>(source: &S, namespace: &str) -> Result<Vec<VolumeRecord>, Error>
where
    S: ClusterSource + ?Sized,
{
    let volumes = source
        .list_volumes(namespace)
        .await
        .context(ListVolumesSnafu { namespace })?;
    debug!(namespace, count = volumes.len(), "Listed volumes");
    if volumes.is_empty() {
        return Ok(Vec::new());
    }

    let pv_info = persistent_volume_info(source).await?;
    Ok(volumes
        .iter()
        .map(|volume| {
            let info = pv_info
                .get(volume.name())
                .cloned()
                .unwrap_or_else(PersistentVolumeInfo::unavailable);
            VolumeRecord::new(volume, namespace, info, None)
        })
        .collect())
}

/// Collect everything known about the given volume.
/// Fails if the volume does not exist or any of its objects cannot be fetched. A missing
/// persistent volume or volume config leaves their fields `NOT_AVAILABLE`, and a missing target
/// node leaves the node empty.
pub async fn describe_volume<S>(
    source: &S,
    name: &str,
    namespace: &str,
) -> Result<VolumeDescription, Error>
where
    S: ClusterSource + ?Sized,
{
    let volume = source
        .get_volume(name, namespace)
        .await
        .context(GetVolumeSnafu { name })?
        .context(VolumeNotFoundSnafu { name, namespace })?;
    let pv = source
        .get_persistent_volume(name)
        .await
        .context(GetPersistentVolumeSnafu { name })?;
    let config = source
        .get_volume_config(name, namespace)
        .await
        .context(GetVolumeConfigSnafu { name })?;
    let node = match source.get_target_node(name, namespace).await {
        Ok(Some(node)) => node,
        Ok(None) => {
            warn!(volume = name, "No target pod found for the volume");
            String::new()
        }
        Err(error) => {
            warn!(volume = name, %error, "Failed to get the target node of the volume");
            String::new()
        }
    };
    let replicas = source
        .list_volume_replicas(name, namespace)
        .await
        .context(ListReplicasSnafu { name })?;
    let replicas = replica_records(&replicas);

    let replication_factor = volume.spec.replication_factor;
    if usize::try_from(replication_factor).ok() != Some(replicas.len()) {
        warn!(
            volume = name,
            replication_factor,
            replicas = replicas.len(),
            "Volume replica count does not match its replication factor"
        );
    }

    let pv_info = match &pv {
        Some(pv) => PersistentVolumeInfo::new(pv, None),
        None => {
            warn!(volume = name, "No persistent volume found for the volume");
            PersistentVolumeInfo::unavailable()
        }
    };
    if config.is_none() {
        warn!(volume = name, "No volume config found for the volume");
    }
    let pv_info = PersistentVolumeInfo { node, ..pv_info };
    let pool_cluster = config.as_ref().and_then(CStorVolumeConfig::pool_cluster);
    let volume = VolumeRecord {
        replica_count: Some(replicas.len()),
        ..VolumeRecord::new(&volume, namespace, pv_info, pool_cluster)
    };
    Ok(VolumeDescription {
        portal: PortalRecord::from(&volume),
        volume,
        replicas,
    })
}

impl CreateRows for VolumeRecord {
    fn create_rows(&self) -> Vec<String> {
        let fields: [&str; 11] = [
            &self.node,
            &self.namespace,
            &self.name,
            &self.csi_volume_attachment_name,
            &self.status,
            &self.volume_type,
            &self.version,
            &self.capacity,
            &self.storage_class,
            &self.attachment_status,
            &self.access_mode,
        ];
        vec![fields.join(COLUMN_SEPARATOR)]
    }
}

impl GetHeaderRow for VolumeRecord {
    fn get_header_row(&self) -> String {
        utils::VOLUME_HEADERS.to_string()
    }
}

impl CreateRows for ReplicaRecord {
    fn create_rows(&self) -> Vec<String> {
        let fields: [&str; 3] = [&self.name, &self.pool_instance, &self.status];
        vec![fields.join(COLUMN_SEPARATOR)]
    }
}

impl GetHeaderRow for ReplicaRecord {
    fn get_header_row(&self) -> String {
        utils::REPLICA_HEADERS.to_string()
    }
}

/// Output of `volume list`.
#[allow(clippy::ptr_arg)]
pub fn format_volumes(volumes: &Vec<VolumeRecord>, output: &OutputFormat) -> Result<String, Error> {
    match output {
        OutputFormat::None if volumes.is_empty() => Ok(format!("{NO_VOLUMES_MESSAGE}\n")),
        _ => utils::format_table(output, volumes),
    }
}

/// Output of `volume describe`: the volume and portal details followed by the replica table.
pub fn format_description(
    description: &VolumeDescription,
    output: &OutputFormat,
) -> Result<String, Error> {
    if output != &OutputFormat::None {
        return utils::format_serialized(output, description);
    }

    let volume = render_template(VOLUME_DETAILS, VOLUME_DETAILS_TEMPLATE, &description.volume)?;
    let portal = render_template(PORTAL_DETAILS, PORTAL_DETAILS_TEMPLATE, &description.portal)?;
    let replicas = if description.volume.has_replicas() {
        format!(
            "{REPLICA_DETAILS_HEADING}{}",
            utils::format_table(output, &description.replicas)?
        )
    } else {
        format!("{NO_REPLICAS_MESSAGE}\n")
    };
    Ok(format!("{volume}\n{portal}\n{replicas}"))
}

/// Volumes resource.
#[derive(clap::Args, Debug)]
pub struct Volumes {}

#[async_trait(?Send)]
impl List for Volumes {
    type Context = VolumeListArgs;
    async fn list<S: ClusterSource + ?Sized>(
        source: &S,
        args: &Self::Context,
        output: &OutputFormat,
    ) -> PluginResult {
        let volumes = list_volumes(source, &args.namespace).await?;
        print!("{}", format_volumes(&volumes, output)?);
        Ok(())
    }
}

/// Volume resource.
#[derive(clap::Args, Debug)]
pub struct Volume {}

#[async_trait(?Send)]
impl Describe for Volume {
    type Context = VolumeDescribeArgs;
    async fn describe<S: ClusterSource + ?Sized>(
        source: &S,
        args: &Self::Context,
        output: &OutputFormat,
    ) -> PluginResult {
        let description = describe_volume(source, &args.volname, &args.namespace).await?;
        print!("{}", format_description(&description, output)?);
        Ok(())
    }
}

#[async_trait(?Send)]
impl Stats for Volume {
    type Context = VolumeStatsArgs;
    async fn stats(args: &Self::Context) -> PluginResult {
        debug!(volume = %args.volname, "Volume statistics are not reported yet");
        Ok(())
    }
}
