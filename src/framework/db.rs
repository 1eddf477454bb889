use mongodb::{
    options::{ClientOptions, Credential, ServerAddress},
    Database,
};
use tracing::debug;

use super::config::DbConfig;

pub fn database(config: &DbConfig) -> Result<Database, mongodb::error::Error> {
    let credential = config.credentials().map(|(username, password)| {
        Credential::builder()
            .username(username.to_owned())
            .password(password.to_owned())
            .build()
    });

    debug!(
        url = config.url(),
        name = config.name(),
        auth = credential.is_some(),
        "connecting to database"
    );

    let options = ClientOptions::builder()
        .app_name("gh-wordle".to_string())
        .credential(credential)
        .hosts(vec![ServerAddress::parse(config.url())?])
        .build();

    Ok(mongodb::Client::with_options(options)?.database(config.name()))
}
