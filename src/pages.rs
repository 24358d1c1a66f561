use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::auth::extractors::session_token;
use crate::state::AppState;

const UPDATES_SHELL: &str = r#"<!doctype html>
<html>
  <head><title>Updates</title></head>
  <body>
    <h1>Updates</h1>
    <ul id="posts"></ul>
    <script>
      fetch("/api/posts")
        .then((r) => r.json())
        .then((posts) => {
          const list = document.getElementById("posts");
          for (const post of posts) {
            const item = document.createElement("li");
            item.textContent = `${post.author_email}: ${post.content}`;
            list.appendChild(item);
          }
        });
    </script>
  </body>
</html>
"#;

/// Protected updates page. Unauthenticated viewers are sent to the login
/// page served by the static frontend.
#[instrument(skip(state, headers))]
pub async fn updates_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let authenticated = session_token(&headers)
        .and_then(|token| state.sessions.resolve(&token))
        .is_some();
    if !authenticated {
        return Redirect::to("/login.html").into_response();
    }
    Html(UPDATES_SHELL).into_response()
}
