use snafu::Snafu;
use std::path::PathBuf;

/// All errors returned when resources command fails.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Error when the given kubeconfig file cannot be loaded.
    #[snafu(display("Failed to read kubeconfig {}. Error {source}", path.display()))]
    KubeConfigRead {
        path: PathBuf,
        source: kube::config::KubeconfigError,
    },
    /// Error when no kubeconfig or in-cluster config can be inferred.
    #[snafu(display("Failed to infer the kubernetes config. Error {source}"))]
    KubeConfigInfer {
        source: kube::config::InferConfigError,
    },
    /// Error when the kubernetes client cannot be created.
    #[snafu(display("Failed to create the kubernetes client. Error {source}"))]
    KubeClient { source: kube::Error },
    /// Error when the requested volume does not exist.
    #[snafu(display("Volume {name} not found in namespace {namespace}"))]
    VolumeNotFound { name: String, namespace: String },
    /// Error when get volume request fails.
    #[snafu(display("Failed to get volume {name}. Error {source}"))]
    GetVolume { name: String, source: kube::Error },
    /// Error when list volumes request fails.
    #[snafu(display("Failed to list volumes in namespace {namespace}. Error {source}"))]
    ListVolumes {
        namespace: String,
        source: kube::Error,
    },
    /// Error when list persistent volumes request fails.
    #[snafu(display("Failed to list persistent volumes. Error {source}"))]
    ListPersistentVolumes { source: kube::Error },
    /// Error when list volume attachments request fails.
    #[snafu(display("Failed to list volume attachments. Error {source}"))]
    ListVolumeAttachments { source: kube::Error },
    /// Error when get persistent volume request fails.
    #[snafu(display("Failed to get persistent volume {name}. Error {source}"))]
    GetPersistentVolume { name: String, source: kube::Error },
    /// Error when get volume config request fails.
    #[snafu(display("Failed to get volume config {name}. Error {source}"))]
    GetVolumeConfig { name: String, source: kube::Error },
    /// Error when list volume replicas request fails.
    #[snafu(display("Failed to list replicas of volume {name}. Error {source}"))]
    ListReplicas { name: String, source: kube::Error },
    /// Error when an output template cannot be parsed.
    #[snafu(display("Failed to parse template {name}. Error {source}"))]
    TemplateParse {
        name: String,
        source: tinytemplate::error::Error,
    },
    /// Error when an output template cannot be rendered with the given data.
    #[snafu(display("Failed to render template {name}. Error {source}"))]
    TemplateRender {
        name: String,
        source: tinytemplate::error::Error,
    },
    /// Error when the output cannot be serialized to json.
    #[snafu(display("Failed to serialize the output to json. Error {source}"))]
    SerializeJson { source: serde_json::Error },
    /// Error when the output cannot be serialized to yaml.
    #[snafu(display("Failed to serialize the output to yaml. Error {source}"))]
    SerializeYaml { source: serde_yaml::Error },
}
