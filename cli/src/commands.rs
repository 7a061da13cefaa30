//! Command handlers. Each one goes through the shared page actions where the
//! web client has one, so validation and messages match the browser.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::fs;
use std::path::Path;

use api::SessionStore;
use api::actions::documents::{self, UploadDraft};
use api::actions::users::{self, UserDraft};
use api::actions::{self, auth as auth_actions};
use api::types::{DocumentInfoUpdate, FilePayload, OAuthProvider, Role, RoleEvent};
use api::validation;
use serde_json::json;

use crate::error::CliError;
use crate::output::{confirm, print_json, print_notice, print_outcome};
use crate::{DocsSubcommand, Services, UsersSubcommand};

// =============================================================================
// AUTH
// =============================================================================

pub async fn login(services: &Services, email: &str, password: &str) -> Result<(), CliError> {
    auth_actions::sign_in_with_password(&services.auth, email, password).await?;
    let session = services.store.current_session().await?.ok_or(CliError::NotSignedIn)?;
    println!("Signed in as {}", session.user.display_name());
    Ok(())
}

pub async fn oauth_url(services: &Services, provider: &str, origin: &str) -> Result<(), CliError> {
    let provider = parse_provider(provider)?;
    auth_actions::sign_in_with_oauth(&services.auth, provider, origin).await?;
    eprintln!("Open the URL above, then run `instashare complete-login '<redirect url>'`.");
    Ok(())
}

pub async fn complete_login(services: &Services, redirect: &str) -> Result<(), CliError> {
    let session = services
        .store
        .complete_redirect(redirect_fragment(redirect))
        .await?
        .ok_or(CliError::NotSignedIn)?;
    println!("Signed in as {}", session.user.display_name());
    Ok(())
}

pub async fn logout(services: &Services) -> Result<(), CliError> {
    auth_actions::log_out(&services.auth).await?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(services: &Services) -> Result<(), CliError> {
    let session = services.store.current_session().await?.ok_or(CliError::NotSignedIn)?;
    let api_user = actions::resolve_api_user(&services.api).await?;
    print_json(&json!({
        "id": session.user.id,
        "email": session.user.email,
        "name": session.user.display_name(),
        "expires_at": session.expires_at,
        "api_user": api_user,
    }))
}

// =============================================================================
// USERS
// =============================================================================

pub async fn users(services: &Services, command: UsersSubcommand) -> Result<(), CliError> {
    let api = &services.api;
    match command {
        UsersSubcommand::List => print_json(&users::load_users(api).await?),
        UsersSubcommand::Get { id } => print_json(&users::load_user(api, id).await?),
        UsersSubcommand::Create { name, email, phone, responsibility, password, confirm_password } => {
            let draft = UserDraft {
                name,
                email,
                phone,
                responsability: responsibility,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            print_notice(&users::create_user(api, &draft).await?);
            Ok(())
        }
        UsersSubcommand::Update { id, name, email, phone, responsibility, password } => {
            let current = users::load_user(api, id).await?;
            let mut draft = UserDraft::from_user(&current);
            apply(&mut draft.name, name);
            apply(&mut draft.email, email);
            apply(&mut draft.phone, phone);
            apply(&mut draft.responsability, responsibility);
            if let Some(password) = password {
                draft.confirm_password.clone_from(&password);
                draft.password = password;
            }
            let (saved, notice) = users::update_user(api, id, &draft).await?;
            print_notice(&notice);
            print_json(&saved)
        }
        UsersSubcommand::Delete { id } => {
            let answer = confirm(users::DELETE_PROMPT, services.assume_yes)?;
            print_outcome(&users::delete_user(api, id, answer).await?);
            Ok(())
        }
        UsersSubcommand::Documents { id } => print_json(&api.documents_uploaded_by_user(id).await?),
        UsersSubcommand::AssignRole { id, role } => {
            let role = Role::parse(&role).ok_or(CliError::UnknownRole(role))?;
            let answer = confirm(&users::assign_role_prompt(role), services.assume_yes)?;
            print_outcome(&users::assign_role(api, id, role, answer).await?);
            Ok(())
        }
    }
}

pub async fn role_event(
    services: &Services,
    user_id: i64,
    event: String,
    description: Option<String>,
) -> Result<(), CliError> {
    let event = RoleEvent { event, user_id, event_description: description };
    print_json(&services.api.create_role_event(&event).await?)
}

// =============================================================================
// DOCUMENTS
// =============================================================================

pub async fn docs(services: &Services, command: DocsSubcommand) -> Result<(), CliError> {
    let api = &services.api;
    match command {
        DocsSubcommand::List => print_json(&api.list_documents().await?),
        DocsSubcommand::Mine => {
            let mine = documents::load_my_documents(api).await?;
            if mine.is_empty() {
                eprintln!("{}", documents::NO_DOCUMENTS);
            }
            print_json(&mine)
        }
        DocsSubcommand::Get { id } => print_json(&documents::load_document_detail(api, id).await?.document),
        DocsSubcommand::Upload { path, name, file_type } => {
            let file = read_upload(&path, &name, &file_type)?;
            let draft = UploadDraft { name, file_type, file: Some(file) };
            print_notice(&documents::upload_document(api, &draft).await?);
            Ok(())
        }
        DocsSubcommand::Update { id, name, file_type } => {
            let current = documents::load_document_detail(api, id).await?.document;
            let mut draft = DocumentInfoUpdate::from_document(&current);
            if name.is_some() {
                draft.name = name;
            }
            if file_type.is_some() {
                draft.doc_type = file_type;
            }
            let (saved, notice) = documents::update_document(api, &current, &draft).await?;
            print_notice(&notice);
            print_json(&saved)
        }
        DocsSubcommand::Delete { id } => {
            let answer = confirm(documents::DELETE_PROMPT, services.assume_yes)?;
            print_outcome(&documents::delete_document(api, id, answer).await?);
            Ok(())
        }
        DocsSubcommand::Shares { id } => {
            let detail = documents::load_document_detail(api, id).await?;
            if detail.shared_with.is_empty() {
                println!("{}", documents::NOT_SHARED);
            }
            for user in &detail.shared_with {
                println!("{}", documents::shared_row(user));
            }
            Ok(())
        }
        DocsSubcommand::Compress { id } => {
            let answer = confirm(documents::COMPRESSION_PROMPT, services.assume_yes)?;
            print_outcome(&documents::start_compression(api, id, answer).await?);
            Ok(())
        }
        DocsSubcommand::Share { id, user_id } => {
            print_notice(&documents::share_document(id, user_id)?);
            Ok(())
        }
    }
}

/// Validate against file metadata, then read the bytes.
fn read_upload(path: &Path, name: &str, file_type: &str) -> Result<FilePayload, CliError> {
    let file_error = |source| CliError::File { path: path.display().to_string(), source };
    let size = fs::metadata(path).map_err(file_error)?.len();
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    validation::check_upload(name, file_type, Some((&file_name, size))).map_err(actions::ActionError::from)?;
    let bytes = fs::read(path).map_err(file_error)?;
    Ok(FilePayload { content_type: content_type_for(&file_name).to_owned(), file_name, bytes })
}

fn content_type_for(file_name: &str) -> &'static str {
    match validation::file_extension(file_name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

fn parse_provider(raw: &str) -> Result<OAuthProvider, CliError> {
    OAuthProvider::ALL
        .into_iter()
        .find(|p| p.as_str().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| CliError::UnknownProvider(raw.to_owned()))
}

/// The `#...` part of a redirect URL; a bare fragment passes through.
fn redirect_fragment(redirect: &str) -> &str {
    redirect.split_once('#').map_or(redirect, |(_, fragment)| fragment)
}

fn apply(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}
