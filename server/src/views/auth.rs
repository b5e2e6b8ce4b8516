//! Pagina di login

use super::{error_explanation, escape};
use axum::response::Html;

pub fn login(email: &str, errors: &[String]) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Log in | Planner admin</title></head>
<body>
<main>
<h1>Log in</h1>
{errors}
<form id="login_form" method="post" action="/auth/login">
<label for="email">Email</label>
<input type="email" id="email" name="email" value="{email}">
<label for="password">Password</label>
<input type="password" id="password" name="password">
<button type="submit">Log in</button>
</form>
</main>
</body>
</html>"#,
        errors = error_explanation(errors),
        email = escape(email),
    ))
}
