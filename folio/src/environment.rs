use std::net::SocketAddr;

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use folio_email_impl::EmailServiceImpl;

use crate::email;

pub type Email = EmailServiceImpl;
pub type ContactFeature = ContactServiceImpl<Email>;
pub type RestServer = folio_api_rest::RestServer<ContactFeature>;

/// Wire up the rest server with all of its dependencies.
pub fn build(config: &Config) -> anyhow::Result<RestServer> {
    let email = email::connect(&config.smtp)?;

    let contact = ContactServiceImpl::new(
        email,
        ContactServiceConfig {
            subject_prefix: config.contact.subject_prefix.as_str().into(),
        },
    );

    let rest_server_config = RestServerConfig {
        addr: SocketAddr::new(config.http.host, config.http.port),
    };

    Ok(RestServer::new(contact, rest_server_config))
}
