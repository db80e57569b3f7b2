// SPDX-License-Identifier: Apache-2.0

//! Static registry of every fixture shipped by vulnlab.
//!
//! Scanners can diff their findings against this list: each entry names the
//! vulnerability class, its CWE, and whether the fixture is expected to be
//! flagged.
//!
//! # Examples
//!
//! ```
//! use vulnlab_core::catalog::{Verdict, find};
//!
//! let fixture = find("full_ssrf").unwrap();
//! assert_eq!(fixture.cwe, 918);
//! assert_eq!(fixture.verdict, Verdict::Vulnerable);
//! ```

use serde::Serialize;

/// Vulnerability class demonstrated by a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VulnClass {
    /// Persisted data reflected without escaping.
    StoredXss,
    /// Request data reflected without escaping.
    ReflectedXss,
    /// Secrets embedded in source.
    HardcodedCredentials,
    /// Attacker-influenced outbound request destination.
    Ssrf,
    /// Query text built from request data.
    SqlInjection,
    /// Cookie name, value or header built from request data.
    CookieInjection,
    /// Filesystem path built from request data.
    PathInjection,
    /// Redirect target taken from request data.
    OpenRedirect,
}

/// Expected scanner outcome for a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Should be reported.
    Vulnerable,
    /// Matched counterpart that should not be reported.
    Safe,
}

/// Description of a single fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Unique identifier.
    pub id: &'static str,
    /// HTTP methods the route accepts (empty when there is no route).
    pub methods: &'static [&'static str],
    /// Route on the demo host, if the fixture has an HTTP surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<&'static str>,
    /// Vulnerability class.
    pub class: VulnClass,
    /// CWE number.
    pub cwe: u32,
    /// Expected scanner outcome.
    pub verdict: Verdict,
    /// Module path of the implementation.
    pub source: &'static str,
}

const GET: &[&str] = &["GET"];

/// Every fixture, in the order the demo host lists them.
pub static FIXTURES: &[Fixture] = &[
    Fixture {
        id: "directory_listing",
        methods: GET,
        route: Some("/files/list"),
        class: VulnClass::StoredXss,
        cwe: 79,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::listing::list_files",
    },
    Fixture {
        id: "hardcoded_db_credentials",
        methods: &[],
        route: None,
        class: VulnClass::HardcodedCredentials,
        cwe: 798,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::credentials::connect",
    },
    Fixture {
        id: "env_db_credentials",
        methods: &[],
        route: None,
        class: VulnClass::HardcodedCredentials,
        cwe: 798,
        verdict: Verdict::Safe,
        source: "vulnlab_core::credentials::connect_from_env",
    },
    Fixture {
        id: "forward",
        methods: &["GET", "POST"],
        route: Some("/forward"),
        class: VulnClass::Ssrf,
        cwe: 918,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::forwarding::handler",
    },
    Fixture {
        id: "full_ssrf",
        methods: GET,
        route: Some("/vulnerabilities/full_ssrf"),
        class: VulnClass::Ssrf,
        cwe: 918,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::forwarding::full_ssrf",
    },
    Fixture {
        id: "partial_ssrf",
        methods: GET,
        route: Some("/vulnerabilities/partial_ssrf"),
        class: VulnClass::Ssrf,
        cwe: 918,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::forwarding::partial_ssrf",
    },
    Fixture {
        id: "safe_partial_ssrf",
        methods: GET,
        route: Some("/vulnerabilities/safe_partial_ssrf"),
        class: VulnClass::Ssrf,
        cwe: 918,
        verdict: Verdict::Safe,
        source: "vulnlab_core::forwarding::safe_partial_ssrf",
    },
    Fixture {
        id: "safe_ssrf",
        methods: GET,
        route: Some("/vulnerabilities/safe_ssrf"),
        class: VulnClass::Ssrf,
        cwe: 918,
        verdict: Verdict::Safe,
        source: "vulnlab_core::forwarding::safe_ssrf",
    },
    Fixture {
        id: "unsafe_xss",
        methods: GET,
        route: Some("/vulnerabilities/unsafe_xss"),
        class: VulnClass::ReflectedXss,
        cwe: 79,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::reflected::unsafe_xss",
    },
    Fixture {
        id: "safe_xss",
        methods: GET,
        route: Some("/vulnerabilities/safe_xss"),
        class: VulnClass::ReflectedXss,
        cwe: 79,
        verdict: Verdict::Safe,
        source: "vulnlab_core::reflected::safe_xss",
    },
    Fixture {
        id: "unsafe_sqli",
        methods: GET,
        route: Some("/vulnerabilities/unsafe_sqli"),
        class: VulnClass::SqlInjection,
        cwe: 89,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::sql::unsafe_sqli",
    },
    Fixture {
        id: "safe_sqli",
        methods: GET,
        route: Some("/vulnerabilities/safe_sqli"),
        class: VulnClass::SqlInjection,
        cwe: 89,
        verdict: Verdict::Safe,
        source: "vulnlab_core::sql::safe_sqli",
    },
    Fixture {
        id: "set_cookie",
        methods: GET,
        route: Some("/vulnerabilities/set_cookie"),
        class: VulnClass::CookieInjection,
        cwe: 20,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::cookies::set_cookie",
    },
    Fixture {
        id: "set_cookie_header",
        methods: GET,
        route: Some("/vulnerabilities/set_cookie_header"),
        class: VulnClass::CookieInjection,
        cwe: 113,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::cookies::set_cookie_header",
    },
    Fixture {
        id: "unsafe_file_access",
        methods: GET,
        route: Some("/vulnerabilities/unsafe_file_access"),
        class: VulnClass::PathInjection,
        cwe: 73,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::files::unsafe_file_access",
    },
    Fixture {
        id: "path_traversal",
        methods: GET,
        route: Some("/vulnerabilities/path_traversal"),
        class: VulnClass::PathInjection,
        cwe: 22,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::files::path_traversal",
    },
    Fixture {
        id: "safe_file_access",
        methods: GET,
        route: Some("/vulnerabilities/safe_file_access"),
        class: VulnClass::PathInjection,
        cwe: 22,
        verdict: Verdict::Safe,
        source: "vulnlab_core::files::safe_file_access",
    },
    Fixture {
        id: "open_redirect",
        methods: GET,
        route: Some("/vulnerabilities/open_redirect"),
        class: VulnClass::OpenRedirect,
        cwe: 601,
        verdict: Verdict::Vulnerable,
        source: "vulnlab_core::redirect::open_redirect",
    },
];

/// Returns all fixtures.
#[must_use]
pub fn all_fixtures() -> &'static [Fixture] {
    FIXTURES
}

/// Looks up a fixture by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Fixture> {
    FIXTURES.iter().find(|f| f.id == id)
}

/// Fixtures that are reachable over HTTP.
pub fn routed() -> impl Iterator<Item = &'static Fixture> {
    FIXTURES.iter().filter(|f| f.route.is_some())
}
