//! Customer account commands.

use crate::Context;

/// # Errors
///
/// Returns an error if the backend rejects the registration (for example, the
/// email is already registered).
pub(crate) async fn run_register(
    ctx: &Context,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let profile = ctx.client.register(username, email, password).await?;
    println!(
        "registered {} <{}>; sign in with `techmart login`",
        profile.username, profile.email
    );
    Ok(())
}

/// # Errors
///
/// Returns an error on bad credentials or if the token cannot be saved.
pub(crate) async fn run_login(ctx: &Context, email: &str, password: &str) -> anyhow::Result<()> {
    let token = ctx.client.login(email, password).await?;
    ctx.session().set_customer_token(&token.access_token)?;

    let who = token
        .user
        .as_ref()
        .map_or(email, |user| user.username.as_str());
    tracing::info!(email, "customer signed in");
    println!("signed in as {who}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the stored token cannot be removed.
pub(crate) fn run_logout(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.session();
    if session.customer_token()?.is_none() {
        println!("not signed in");
        return Ok(());
    }
    session.clear_customer_token()?;
    println!("signed out");
    Ok(())
}
