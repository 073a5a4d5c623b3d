use attendsync_core::models::{User, UserUpdate};

use crate::commands::common::{
    format_user_line, open_app, parse_join_date, user_to_list_item, UserListItem,
};
use crate::config_file::ResolvedSettings;
use crate::error::CliError;

pub fn run_users_list(
    settings: &ResolvedSettings,
    all: bool,
    as_json: bool,
) -> Result<(), CliError> {
    let app = open_app(settings)?;
    let users = if all {
        app.users().load_or_seed()?
    } else {
        app.users().active_staff()?
    };

    if as_json {
        let items = users.iter().map(user_to_list_item).collect::<Vec<UserListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for user in &users {
            println!("{}", format_user_line(user));
        }
    }
    Ok(())
}

pub struct NewUser {
    pub id: String,
    pub name: String,
    pub username: Option<String>,
    pub password: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub join_date: Option<String>,
    pub admin: bool,
}

pub fn build_user(new_user: NewUser) -> Result<User, CliError> {
    let mut user = User::new(new_user.id.trim(), new_user.name.trim(), new_user.password);
    if let Some(username) = new_user.username {
        user.username = username.trim().to_string();
    }
    user.department = new_user.department;
    user.position = new_user.position;
    user.join_date = parse_join_date(new_user.join_date)?;
    user.is_admin = new_user.admin;
    Ok(user)
}

pub fn run_users_add(settings: &ResolvedSettings, new_user: NewUser) -> Result<(), CliError> {
    let app = open_app(settings)?;
    app.users().load_or_seed()?;
    let user = app.users().add(build_user(new_user)?)?;
    println!("Added {}", format_user_line(&user));
    Ok(())
}

pub fn run_users_update(
    settings: &ResolvedSettings,
    id: &str,
    update: UserUpdate,
) -> Result<(), CliError> {
    if update.is_empty() {
        return Err(CliError::EmptyUpdate);
    }
    let app = open_app(settings)?;
    app.users().load_or_seed()?;
    let user = app.users().update(id.trim(), update)?;
    println!("Updated {}", format_user_line(&user));
    Ok(())
}

pub fn run_users_deactivate(settings: &ResolvedSettings, id: &str) -> Result<(), CliError> {
    let app = open_app(settings)?;
    app.users().load_or_seed()?;
    let user = app.users().deactivate(id.trim())?;
    println!("Deactivated {}", format_user_line(&user));
    Ok(())
}
