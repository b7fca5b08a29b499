//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write as _;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key file");
    file
}

fn env_from(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

struct ReleaseVars {
    vars: HashMap<&'static str, String>,
    _key: NamedTempFile,
}

impl ReleaseVars {
    fn set(mut self, name: &'static str, value: &str) -> Self {
        self.vars.insert(name, value.to_owned());
        self
    }

    fn unset(mut self, name: &'static str) -> Self {
        self.vars.remove(name);
        self
    }

    fn load(&self, mode: BuildMode) -> Result<SessionSettings, SessionConfigError> {
        session_settings_from_env(&env_from(self.vars.clone()), mode)
    }
}

#[fixture]
fn release_vars() -> ReleaseVars {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let vars = HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    ReleaseVars { vars, _key: key }
}

#[rstest]
fn release_accepts_complete_configuration(release_vars: ReleaseVars) {
    let settings = release_vars
        .load(BuildMode::Release)
        .expect("complete release config");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.ttl, Duration::hours(DEFAULT_TTL_HOURS));
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV)]
#[case::same_site(SAMESITE_ENV)]
#[case::allow_ephemeral(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(release_vars: ReleaseVars, #[case] name: &'static str) {
    let err = release_vars
        .unset(name)
        .load(BuildMode::Release)
        .err()
        .expect("missing toggle must fail");
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV, "maybe")]
#[case::same_site(SAMESITE_ENV, "sometimes")]
#[case::ttl(TTL_HOURS_ENV, "0")]
#[case::ttl_too_long(TTL_HOURS_ENV, "9999")]
#[case::ttl_not_a_number(TTL_HOURS_ENV, "two")]
fn release_rejects_invalid_values(
    release_vars: ReleaseVars,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let err = release_vars
        .set(name, value)
        .load(BuildMode::Release)
        .err()
        .expect("invalid value must fail");
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: bad, .. } if bad == name));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(release_vars: ReleaseVars) {
    let err = release_vars
        .set(COOKIE_SECURE_ENV, "0")
        .set(SAMESITE_ENV, "None")
        .load(BuildMode::Release)
        .err()
        .expect("insecure None must fail");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_vars: ReleaseVars) {
    let err = release_vars
        .set(ALLOW_EPHEMERAL_ENV, "yes")
        .load(BuildMode::Release)
        .err()
        .expect("ephemeral must fail");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys(release_vars: ReleaseVars) {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let err = release_vars
        .set(KEY_FILE_ENV, &short.path().to_string_lossy())
        .load(BuildMode::Release)
        .err()
        .expect("short key must fail");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file(release_vars: ReleaseVars) {
    let err = release_vars
        .set(KEY_FILE_ENV, "/nonexistent/coedit/session_key")
        .load(BuildMode::Release)
        .err()
        .expect("missing key must fail");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let settings = session_settings_from_env(
        &env_from(HashMap::from([(
            KEY_FILE_ENV,
            "/nonexistent/coedit/session_key".to_owned(),
        )])),
        BuildMode::Debug,
    )
    .expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
    assert_eq!(settings.ttl, Duration::hours(DEFAULT_TTL_HOURS));
}

#[rstest]
#[case::invalid_bool(COOKIE_SECURE_ENV, "maybe")]
#[case::invalid_same_site(SAMESITE_ENV, "sometimes")]
#[case::invalid_ttl(TTL_HOURS_ENV, "-3")]
fn debug_tolerates_invalid_values(#[case] name: &'static str, #[case] value: &str) {
    let settings = session_settings_from_env(
        &env_from(HashMap::from([(name, value.to_owned())])),
        BuildMode::Debug,
    )
    .expect("debug tolerates bad values");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
    assert_eq!(settings.ttl, Duration::hours(DEFAULT_TTL_HOURS));
}

#[rstest]
#[case("1", 1)]
#[case(" 12 ", 12)]
#[case("720", 720)]
fn ttl_hours_are_honoured(release_vars: ReleaseVars, #[case] raw: &str, #[case] hours: i64) {
    let settings = release_vars
        .set(TTL_HOURS_ENV, raw)
        .load(BuildMode::Release)
        .expect("valid ttl");
    assert_eq!(settings.ttl, Duration::hours(hours));
}

#[rstest]
fn same_key_file_yields_same_key(release_vars: ReleaseVars) {
    let first = release_vars.load(BuildMode::Release).expect("first load");
    let second = release_vars.load(BuildMode::Release).expect("second load");
    assert_eq!(first.key.master(), second.key.master());
}
