use recap_domain::constants::SESSION_COOKIE;
use recap_kernel::security::SessionId;

/// Reads a session token from `Authorization: Bearer ...` or the session cookie.
///
/// The bearer header wins when both are present. Tokens that do not have the
/// shape of a generated id are ignored.
pub fn session_token<'a>(
    authorization: Option<&str>,
    cookies: impl IntoIterator<Item = &'a str>,
) -> Option<SessionId> {
    let bearer = authorization.and_then(|value| {
        let (scheme, token) = value.trim().split_once(' ')?;
        scheme.eq_ignore_ascii_case("bearer").then_some(token)
    });
    if let Some(id) = bearer.and_then(SessionId::parse) {
        return Some(id);
    }

    cookies
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}
