use super::*;

#[test]
fn defaults_describe_the_reference_panel() {
    let cfg = PlayerConfig::default();
    cfg.validate().unwrap();
    let physical = cfg.physical().unwrap();
    assert_eq!(physical.radial_pixels, 24);
    assert_eq!(physical.spacing, 2);
    assert_eq!(physical.rps, 25.0);
    assert_eq!(cfg.transport, TransportKind::Tcp);
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg = PlayerConfig::from_json_str(r#"{"host":"10.0.0.5","rpm":600,"transport":"udp"}"#)
        .unwrap();
    assert_eq!(cfg.host, "10.0.0.5");
    assert_eq!(cfg.port, 5005);
    assert_eq!(cfg.rpm, 600.0);
    assert_eq!(cfg.transport, TransportKind::Udp);
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    let err = PlayerConfig::from_json_str(r#"{"hostname":"x"}"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));

    let err = PlayerConfig::from_json_str(r#"{"rpm":0}"#).unwrap_err();
    assert!(err.to_string().contains("validation error:"));

    assert!(PlayerConfig::from_json_str(r#"{"port":0}"#).is_err());
    assert!(PlayerConfig::from_json_str(r#"{"host":"  "}"#).is_err());
    assert!(PlayerConfig::from_json_str(r#"{"spacing":0}"#).is_err());
}

#[test]
fn connect_reports_refused_tcp_as_transport_error() {
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let cfg = PlayerConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..PlayerConfig::default()
    };
    match cfg.connect() {
        Err(e) => assert!(e.is_transport()),
        Ok(_) => panic!("connect to a closed port succeeded"),
    }
}
