use crate::ipc::IpcClient;

/// **VALUE**: Verifies the builder's defaults: `localhost`, plaintext scheme, port
/// segment enabled.
///
/// **WHY THIS MATTERS**: These defaults are the documented contract for the common
/// same-host deployment; callers set only a port and expect `ws://localhost:{port}`.
///
/// **BUG THIS CATCHES**: Would catch a changed default host, an `ssl_mode` default
/// flipping to `wss`, or `use_port` defaulting off.
#[test]
fn given_only_port_when_built_then_defaults_fill_the_rest() {
    // GIVEN: A builder with nothing but a port
    let client = IpcClient::builder().with_port(8765).build();

    // WHEN / THEN: Every other value comes from the defaults
    assert_eq!(client.url(), "ws://localhost:8765");
}

/// **VALUE**: Verifies that build() is infallible for incomplete configurations.
///
/// **WHY THIS MATTERS**: The construction contract is "store verbatim, validate
/// nothing": a missing port or secret must be accepted silently and only surface
/// when (and if) a request is made.
///
/// **BUG THIS CATCHES**: Would catch validation creeping into build() and turning
/// accepted configurations into construction-time panics or errors.
#[test]
fn given_bare_builder_when_built_then_construction_succeeds() {
    // GIVEN / WHEN: Building with no configuration at all
    let client = IpcClient::builder().build();

    // THEN: Construction succeeded; the gap shows up only in the URL
    assert_eq!(client.url(), "ws://localhost:");
}
