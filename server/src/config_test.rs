use super::*;

fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |var| pairs.iter().find(|(k, _)| *k == var).map(|(_, v)| (*v).to_owned())
}

#[test]
fn port_defaults_to_3000() {
    let config = ServerConfig::from_lookup(lookup(&[])).expect("config");
    assert_eq!(config.port, 3000);
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn port_is_read_from_env() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", " 8080 ")])).expect("config");
    assert_eq!(config.port, 8080);
}

#[test]
fn invalid_port_is_a_startup_error() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).expect_err("must fail");
    assert!(matches!(err, ServerError::InvalidPort(ref v) if v == "http"));
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}

#[test]
fn missing_endpoints_are_collected_not_fatal() {
    let config = ServerConfig::from_lookup(lookup(&[("INSTASHARE_API_URL", "http://api.test/")])).expect("config");
    assert_eq!(config.endpoints.api_url, "http://api.test");
    assert_eq!(config.missing.len(), 2);
}
