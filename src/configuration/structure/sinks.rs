//! Per-backend sink configuration.
//!
//! Each backend block is optional and independent of the others: the relay
//! fans out to every sink present in the file. Blocks are carried through as
//! written; only the sink implementations know what their values mean
//! (including `backpressure_policy`).

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use serde::Deserialize;

use crate::configuration::{traits::ResolvableConfiguration, ConfigurationError};


#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub(super) struct UnresolvedSinksConfiguration {
    s3: Option<S3SinkConfiguration>,
    gcs: Option<GcsSinkConfiguration>,
    bigquery: Option<BigQuerySinkConfiguration>,
    timestream: Option<TimestreamSinkConfiguration>,
    influxdb: Option<InfluxDbSinkConfiguration>,
    prometheus: Option<PrometheusSinkConfiguration>,
    elasticsearch: Option<ElasticsearchSinkConfiguration>,
    kafka: Option<KafkaSinkConfiguration>,
    file: Option<FileSinkConfiguration>,
    nats: Option<NatsSinkConfiguration>,
}

impl ResolvableConfiguration for UnresolvedSinksConfiguration {
    type Resolved = SinksConfiguration;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let sinks = [
            self.s3.map(SinkConfiguration::S3),
            self.gcs.map(SinkConfiguration::Gcs),
            self.bigquery.map(SinkConfiguration::BigQuery),
            self.timestream.map(SinkConfiguration::Timestream),
            self.influxdb.map(SinkConfiguration::InfluxDb),
            self.prometheus.map(SinkConfiguration::Prometheus),
            self.elasticsearch.map(SinkConfiguration::Elasticsearch),
            self.kafka.map(SinkConfiguration::Kafka),
            self.file.map(SinkConfiguration::File),
            self.nats.map(SinkConfiguration::Nats),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(SinksConfiguration { sinks })
    }
}


/// The set of configured sinks, at most one per [`SinkKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SinksConfiguration {
    sinks: Vec<SinkConfiguration>,
}

impl SinksConfiguration {
    pub fn iter(&self) -> impl Iterator<Item = &SinkConfiguration> {
        self.sinks.iter()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn get(&self, kind: SinkKind) -> Option<&SinkConfiguration> {
        self.sinks.iter().find(|sink| sink.kind() == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = SinkKind> + '_ {
        self.sinks.iter().map(SinkConfiguration::kind)
    }
}

impl<'a> IntoIterator for &'a SinksConfiguration {
    type Item = &'a SinkConfiguration;
    type IntoIter = std::slice::Iter<'a, SinkConfiguration>;

    fn into_iter(self) -> Self::IntoIter {
        self.sinks.iter()
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    S3,
    Gcs,
    BigQuery,
    Timestream,
    InfluxDb,
    Prometheus,
    Elasticsearch,
    Kafka,
    File,
    Nats,
}

impl SinkKind {
    /// Name of the backend's table under `[sinks]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::Gcs => "gcs",
            Self::BigQuery => "bigquery",
            Self::Timestream => "timestream",
            Self::InfluxDb => "influxdb",
            Self::Prometheus => "prometheus",
            Self::Elasticsearch => "elasticsearch",
            Self::Kafka => "kafka",
            Self::File => "file",
            Self::Nats => "nats",
        }
    }
}

impl Display for SinkKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// One configured sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkConfiguration {
    S3(S3SinkConfiguration),
    Gcs(GcsSinkConfiguration),
    BigQuery(BigQuerySinkConfiguration),
    Timestream(TimestreamSinkConfiguration),
    InfluxDb(InfluxDbSinkConfiguration),
    Prometheus(PrometheusSinkConfiguration),
    Elasticsearch(ElasticsearchSinkConfiguration),
    Kafka(KafkaSinkConfiguration),
    File(FileSinkConfiguration),
    Nats(NatsSinkConfiguration),
}

impl SinkConfiguration {
    pub fn kind(&self) -> SinkKind {
        match self {
            Self::S3(_) => SinkKind::S3,
            Self::Gcs(_) => SinkKind::Gcs,
            Self::BigQuery(_) => SinkKind::BigQuery,
            Self::Timestream(_) => SinkKind::Timestream,
            Self::InfluxDb(_) => SinkKind::InfluxDb,
            Self::Prometheus(_) => SinkKind::Prometheus,
            Self::Elasticsearch(_) => SinkKind::Elasticsearch,
            Self::Kafka(_) => SinkKind::Kafka,
            Self::File(_) => SinkKind::File,
            Self::Nats(_) => SinkKind::Nats,
        }
    }

    /// Capacity of the sink's input queue (`0` if unset).
    pub fn queue_size(&self) -> usize {
        match self {
            Self::S3(sink) => sink.queue_size,
            Self::Gcs(sink) => sink.queue_size,
            Self::BigQuery(sink) => sink.queue_size,
            Self::Timestream(sink) => sink.queue_size,
            Self::InfluxDb(sink) => sink.queue_size,
            Self::Prometheus(sink) => sink.queue_size,
            Self::Elasticsearch(sink) => sink.queue_size,
            Self::Kafka(sink) => sink.queue_size,
            Self::File(sink) => sink.queue_size,
            Self::Nats(sink) => sink.queue_size,
        }
    }

    /// What the sink should do when its queue is full (empty if unset).
    pub fn backpressure_policy(&self) -> &str {
        match self {
            Self::S3(sink) => &sink.backpressure_policy,
            Self::Gcs(sink) => &sink.backpressure_policy,
            Self::BigQuery(sink) => &sink.backpressure_policy,
            Self::Timestream(sink) => &sink.backpressure_policy,
            Self::InfluxDb(sink) => &sink.backpressure_policy,
            Self::Prometheus(sink) => &sink.backpressure_policy,
            Self::Elasticsearch(sink) => &sink.backpressure_policy,
            Self::Kafka(sink) => &sink.backpressure_policy,
            Self::File(sink) => &sink.backpressure_policy,
            Self::Nats(sink) => &sink.backpressure_policy,
        }
    }
}



/// Amazon S3 object storage.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct S3SinkConfiguration {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub prefix: String,
    #[serde(with = "humantime_serde")]
    pub flush_interval: Option<Duration>,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

/// Google Cloud Storage.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GcsSinkConfiguration {
    pub bucket: String,
    pub project_id: String,
    /// Path to a service account JSON file.
    pub credentials: String,
    pub prefix: String,
    #[serde(with = "humantime_serde")]
    pub flush_interval: Option<Duration>,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BigQuerySinkConfiguration {
    pub project_id: String,
    pub dataset: String,
    pub table: String,
    /// Path to a service account JSON file.
    pub credentials: String,
    /// Messages per insert.
    pub batch_size: usize,
    pub flush_interval: String,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

/// AWS Timestream.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TimestreamSinkConfiguration {
    pub database: String,
    pub table: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// Only needed with temporary credentials.
    pub session_token: Option<String>,
    pub batch_size: usize,
    pub flush_interval: String,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

/// InfluxDB. `database`, `username` and `password` are for 1.x;
/// `token`, `organization` and `bucket` for 2.x.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InfluxDbSinkConfiguration {
    pub url: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub token: String,
    pub organization: String,
    pub bucket: String,
    pub batch_size: usize,
    pub flush_interval: String,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PrometheusSinkConfiguration {
    pub url: String,
    pub job: String,
    pub instance: String,
    pub batch_size: usize,
    pub flush_interval: String,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ElasticsearchSinkConfiguration {
    pub urls: Vec<String>,
    pub index: String,
    pub username: String,
    pub password: String,
    pub api_key: String,
    pub batch_size: usize,
    pub flush_interval: String,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct KafkaSinkConfiguration {
    pub brokers: Vec<String>,
    pub topic: String,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

/// Local files.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FileSinkConfiguration {
    /// Output directory.
    pub path: String,
    /// Prepended to every file name.
    pub prefix: String,
    /// `json`, `csv` or `binary`.
    pub format: String,
    #[serde(with = "humantime_serde")]
    pub rotation_interval: Option<Duration>,
    pub queue_size: usize,
    pub backpressure_policy: String,
}

/// NATS, optionally backed by JetStream and a key-value bucket.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NatsSinkConfiguration {
    pub url: String,
    /// Either a template (`"{entity_id}.mavlink"`) or a static subject.
    pub subject: String,
    pub token: Option<String>,
    pub creds_file: Option<String>,
    pub queue_size: usize,
    pub backpressure_policy: String,
    pub stream: Option<NatsStreamConfiguration>,
    pub kv: Option<NatsKeyValueConfiguration>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NatsStreamConfiguration {
    pub name: String,
    pub subjects: Vec<String>,
    /// `memory` or `file`.
    pub storage: String,
    pub replicas: u32,
    pub max_age: String,
    pub max_bytes: i64,
    pub max_msgs: i64,
    pub compression: bool,
}

/// Key-value bucket holding the latest state of each device.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NatsKeyValueConfiguration {
    pub bucket: String,
    pub key_pattern: String,
    pub ttl: String,
    pub max_bytes: i64,
    pub replicas: u32,
    pub storage: String,
    pub description: String,
    /// Message types to track, e.g. `["Heartbeat", "GlobalPositionInt"]`.
    pub message_types: Vec<String>,
}
