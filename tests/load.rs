//! Loads configuration files from disk, end to end.

use std::io::Write;
use std::time::Duration;

use drone_relay_config::{
    Configuration, ConfigurationError, Dialect, EndpointMode, EndpointProtocol, SinkConfiguration,
    SinkKind,
};
use tempfile::NamedTempFile;

fn write_configuration(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load(contents: &str) -> Result<Configuration, ConfigurationError> {
    let file = write_configuration(contents);
    Configuration::load_from_path(file.path())
}

const THREE_ENDPOINTS: &str = r#"
[[mavlink.endpoints]]
name = "drone-1"
drone_id = "drone-1"
protocol = "udp"
mode = "1:1"
port = 14550

[[mavlink.endpoints]]
name = "drone-2"
drone_id = "drone-2"
protocol = "tcp"
mode = "1:1"
port = 5760

[[mavlink.endpoints]]
name = "ground-station"
drone_id = "ground-station"
protocol = "serial"
mode = "1:1"
baud_rate = 57600
"#;


#[test]
fn test_full_configuration() {
    let configuration = load(&format!(
        r#"
[relay]
buffer_size = 2000

[mavlink]
dialect = "ardupilot"
{THREE_ENDPOINTS}

[sinks.s3]
bucket = "test-bucket"
region = "us-west-2"
access_key = "test-key"
secret_key = "test-secret"
prefix = "telemetry"

[sinks.kafka]
brokers = ["localhost:9092", "localhost:9093"]
topic = "telemetry-data"

[sinks.file]
path = "/var/log/telemetry"
format = "json"
rotation_interval = "24h"

[logging]
level = "debug"
format = "json"
output = "file"
file = "/var/log/relay/app.log"
"#
    ))
    .unwrap();

    assert_eq!(configuration.relay.buffer_size.get(), 2000);
    assert_eq!(configuration.mavlink.dialect_name, "ardupilot");
    assert_eq!(configuration.mavlink.dialect, Dialect::ArdupilotMega);

    let expected_endpoints = [
        ("drone-1", EndpointProtocol::Udp, Some(14550), None),
        ("drone-2", EndpointProtocol::Tcp, Some(5760), None),
        ("ground-station", EndpointProtocol::Serial, None, Some(57600)),
    ];
    assert_eq!(configuration.mavlink.endpoints.len(), expected_endpoints.len());

    for (endpoint, (name, protocol, port, baud_rate)) in configuration
        .mavlink
        .endpoints
        .iter()
        .zip(expected_endpoints)
    {
        assert_eq!(endpoint.name, name);
        assert_eq!(endpoint.drone_id, name);
        assert_eq!(endpoint.protocol, protocol);
        assert_eq!(endpoint.mode, EndpointMode::OneToOne);
        assert_eq!(endpoint.port, port);
        assert_eq!(endpoint.baud_rate, baud_rate);
    }

    assert_eq!(
        configuration.sinks.kinds().collect::<Vec<_>>(),
        [SinkKind::S3, SinkKind::Kafka, SinkKind::File]
    );

    let Some(SinkConfiguration::S3(s3)) = configuration.sinks.get(SinkKind::S3) else {
        panic!("s3 sink should be configured");
    };
    assert_eq!(s3.bucket, "test-bucket");
    assert_eq!(s3.region, "us-west-2");
    assert_eq!(s3.prefix, "telemetry");

    let Some(SinkConfiguration::Kafka(kafka)) = configuration.sinks.get(SinkKind::Kafka) else {
        panic!("kafka sink should be configured");
    };
    assert_eq!(kafka.brokers.len(), 2);
    assert_eq!(kafka.topic, "telemetry-data");

    let Some(SinkConfiguration::File(file_sink)) = configuration.sinks.get(SinkKind::File) else {
        panic!("file sink should be configured");
    };
    assert_eq!(file_sink.path, "/var/log/telemetry");
    assert_eq!(file_sink.format, "json");
    assert_eq!(
        file_sink.rotation_interval,
        Some(Duration::from_secs(24 * 60 * 60))
    );

    assert_eq!(configuration.logging.level, "debug");
    assert_eq!(configuration.logging.format, "json");
    assert_eq!(configuration.logging.output, "file");
    assert_eq!(
        configuration.logging.file.as_deref(),
        Some(std::path::Path::new("/var/log/relay/app.log"))
    );
}

#[test]
fn test_minimal_configuration_is_defaulted() {
    let configuration = load(&format!(
        "{THREE_ENDPOINTS}\n[sinks.file]\npath = \"/tmp/telemetry\"\n"
    ))
    .unwrap();

    let endpoint_names: Vec<&str> = configuration
        .mavlink
        .endpoints
        .iter()
        .map(|endpoint| endpoint.name.as_str())
        .collect();
    assert_eq!(endpoint_names, ["drone-1", "drone-2", "ground-station"]);

    assert_eq!(configuration.relay.buffer_size.get(), 1000);
    assert_eq!(configuration.mavlink.dialect_name, "common");
    assert_eq!(configuration.mavlink.dialect, Dialect::Common);
    assert_eq!(configuration.logging.level, "info");
    assert_eq!(configuration.logging.format, "text");
    assert_eq!(configuration.logging.output, "stdout");
    assert_eq!(configuration.logging.file, None);
    assert_eq!(configuration.sinks.len(), 1);
}

#[test]
fn test_file_path_is_canonicalized() {
    let file = write_configuration(THREE_ENDPOINTS);
    let configuration = Configuration::load_from_path(file.path()).unwrap();

    assert_eq!(
        configuration.file_path,
        dunce::canonicalize(file.path()).unwrap()
    );
}

#[test]
fn test_missing_file() {
    let result = Configuration::load_from_path("/nonexistent/relay.toml");

    match result {
        Err(ConfigurationError::FileAccess { path, .. }) => {
            assert_eq!(path, std::path::Path::new("/nonexistent/relay.toml"));
        }
        other => panic!("expected a file access error, got {other:?}"),
    }
}

#[test]
fn test_invalid_toml() {
    let result = load("[mavlink\ninvalid = toml: content: [unclosed\n");

    assert!(matches!(result, Err(ConfigurationError::Parse { .. })));
}

#[test]
fn test_no_endpoints_is_distinct_from_no_valid_endpoints() {
    assert!(matches!(
        load("[relay]\nbuffer_size = 100\n"),
        Err(ConfigurationError::NoEndpoints)
    ));

    assert!(matches!(
        load(
            r#"
[[mavlink.endpoints]]
name = "drone-1"
protocol = "udp"
mode = "1:1"
port = 14550
"#
        ),
        Err(ConfigurationError::NoValidEndpoints { rejected: 1 })
    ));
}

#[test]
fn test_invalid_endpoints_are_dropped() {
    let configuration = load(
        r#"
[[mavlink.endpoints]]
name = "missing-drone-id"
protocol = "udp"
mode = "1:1"
port = 14551

[[mavlink.endpoints]]
name = "drone-1"
drone_id = "drone-1"
protocol = "udp"
mode = "1:1"
port = 14550

[[mavlink.endpoints]]
name = "swarm"
drone_id = "swarm"
protocol = "udp"
mode = "multi"
port = 14552

[[mavlink.endpoints]]
name = "bad-protocol"
drone_id = "drone-9"
protocol = "quic"
mode = "1:1"

[[mavlink.endpoints]]
name = "bad-mode"
drone_id = "drone-8"
protocol = "tcp"
mode = "n:m"

[[mavlink.endpoints]]
name = "drone-2"
drone_id = "drone-2"
protocol = "tcp"
mode = "1:1"
port = 5760
"#,
    )
    .unwrap();

    let endpoint_names: Vec<&str> = configuration
        .mavlink
        .endpoints
        .iter()
        .map(|endpoint| endpoint.name.as_str())
        .collect();
    assert_eq!(endpoint_names, ["drone-1", "drone-2"]);
}

#[test]
fn test_out_of_range_port_drops_only_that_endpoint() {
    let configuration = load(
        r#"
[[mavlink.endpoints]]
name = "too-high"
drone_id = "drone-9"
protocol = "udp"
mode = "1:1"
port = 70000

[[mavlink.endpoints]]
name = "drone-1"
drone_id = "drone-1"
protocol = "udp"
mode = "1:1"
port = 14550
"#,
    )
    .unwrap();

    assert_eq!(configuration.mavlink.endpoints.len(), 1);
    assert_eq!(configuration.mavlink.endpoints[0].name, "drone-1");
    assert_eq!(configuration.mavlink.endpoints[0].port, Some(14550));
}

#[test]
fn test_multi_mode_only_fails_the_load() {
    let result = load(
        r#"
[[mavlink.endpoints]]
name = "swarm"
drone_id = "swarm"
protocol = "udp"
mode = "multi"
port = 14550
"#,
    );

    assert!(matches!(
        result,
        Err(ConfigurationError::NoValidEndpoints { rejected: 1 })
    ));
}

#[test]
fn test_dialect_names() {
    for (dialect_name, dialect) in [
        ("common", Dialect::Common),
        ("minimal", Dialect::Minimal),
        ("ardupilot", Dialect::ArdupilotMega),
        ("ardupilotmega", Dialect::ArdupilotMega),
        ("APM", Dialect::ArdupilotMega),
        ("paparazzi", Dialect::Paparazzi),
        ("standard", Dialect::Standard),
        ("all", Dialect::All),
        ("PX4", Dialect::Development),
        ("development", Dialect::Development),
    ] {
        let configuration = load(&format!(
            "[mavlink]\ndialect = \"{dialect_name}\"\n{THREE_ENDPOINTS}"
        ))
        .unwrap();

        assert_eq!(configuration.mavlink.dialect, dialect);
        assert_eq!(configuration.mavlink.dialect_name, dialect_name);
    }
}

#[test]
fn test_invalid_dialect() {
    let result = load(&format!(
        "[mavlink]\ndialect = \"invalid_dialect\"\n{THREE_ENDPOINTS}"
    ));

    match result {
        Err(error @ ConfigurationError::InvalidDialect { .. }) => {
            assert!(error.to_string().contains("invalid_dialect"));
        }
        other => panic!("expected an invalid dialect error, got {other:?}"),
    }
}

#[test]
fn test_environment_variables_are_expanded() {
    std::env::set_var("DRONE_RELAY_CONFIG_TEST_BUCKET", "bucket-from-env");
    std::env::set_var("DRONE_RELAY_CONFIG_TEST_PORT", "14560");

    let configuration = load(
        r#"
[[mavlink.endpoints]]
name = "drone-1"
drone_id = "drone-1"
protocol = "udp"
mode = "1:1"
port = ${DRONE_RELAY_CONFIG_TEST_PORT}

[sinks.gcs]
bucket = "$DRONE_RELAY_CONFIG_TEST_BUCKET"
credentials = "${DRONE_RELAY_CONFIG_TEST_UNSET}/service-account.json"
"#,
    )
    .unwrap();

    assert_eq!(configuration.mavlink.endpoints[0].port, Some(14560));

    let Some(SinkConfiguration::Gcs(gcs)) = configuration.sinks.get(SinkKind::Gcs) else {
        panic!("gcs sink should be configured");
    };
    assert_eq!(gcs.bucket, "bucket-from-env");
    assert_eq!(
        gcs.credentials,
        "${DRONE_RELAY_CONFIG_TEST_UNSET}/service-account.json"
    );
}

#[test]
fn test_repeated_loads_are_independent() {
    let file = write_configuration(THREE_ENDPOINTS);

    let first = Configuration::load_from_path(file.path()).unwrap();
    let second = Configuration::load_from_path(file.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sample_configuration_loads() {
    let configuration =
        Configuration::load_from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/configs/relay.toml"))
            .unwrap();

    assert_eq!(configuration.mavlink.endpoints.len(), 3);
    assert_eq!(
        configuration.sinks.kinds().collect::<Vec<_>>(),
        [SinkKind::File]
    );
}
