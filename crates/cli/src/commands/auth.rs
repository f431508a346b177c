//! Session commands.

use std::io::BufRead;

use stampdesk_console::screens::{DashboardScreen, LoginScreen};
use stampdesk_console::{Console, Route};
use stampdesk_core::forms::LoginDraft;

use super::{CliError, loaded, print};

/// Sign in, then show the dashboard.
pub async fn login(
    console: &mut Console,
    user: String,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    console.navigator.navigate(Route::Login);
    let mut screen = LoginScreen::new(LoginDraft::new(user, password));
    if screen.submit(&console.client, &mut console.navigator).await {
        tracing::info!("Signed in");
        return dashboard(console).await;
    }

    let message = screen.phase().error().unwrap_or("Sign-in failed").to_string();
    if screen.field_errors().is_empty() {
        Err(CliError::Failed(message))
    } else {
        Err(CliError::Invalid {
            message,
            details: stampdesk_console::render::render_field_errors(screen.field_errors()),
        })
    }
}

/// First line of stdin, without the line ending.
fn read_password() -> Result<String, CliError> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(CliError::Stdin)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn logout(console: &Console) -> Result<(), CliError> {
    console.client.logout().await?;
    tracing::info!("Signed out");
    Ok(())
}

/// Show the welcome block for the signed-in user.
pub async fn dashboard(console: &mut Console) -> Result<(), CliError> {
    let mut screen = DashboardScreen::new();
    screen.load(&console.client, &mut console.navigator).await;
    loaded(screen.state(), &console.navigator)?;
    if let Some(greeting) = screen.greeting() {
        print(&greeting);
    }
    Ok(())
}
