use std::sync::Arc;

use portfolio_api_rest::{RealIpConfig, RestServerConfig};
use portfolio_config::Config;
use portfolio_core_contact_impl::ContactFeatureConfig;
use portfolio_core_health_impl::HealthFeatureConfig;
use types::{
    Audit, ContactFeature, Email, HealthFeature, RateLimit, RestServer, Template, TemplateEmail,
};

pub mod types;

/// Wires all services together, given the connected backends.
#[derive(Debug)]
pub struct Environment {
    config: Config,
    email: Email,
    rate_limit: RateLimit,
}

impl Environment {
    pub fn new(config: Config, email: Email, rate_limit: RateLimit) -> Self {
        Self {
            config,
            email,
            rate_limit,
        }
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer> {
        Ok(RestServer::new(
            self.health_feature(),
            self.contact_feature()?,
            self.rest_server_config(),
        ))
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeature::new(
            Default::default(),
            self.email.clone(),
            self.rate_limit.clone(),
            HealthFeatureConfig {
                cache_ttl: self.config.health.cache_ttl.into(),
            },
        )
    }

    pub fn contact_feature(&self) -> anyhow::Result<ContactFeature> {
        let template_email = TemplateEmail::new(self.email.clone(), Template::new()?);
        let contact = &self.config.contact;

        Ok(ContactFeature::new(
            Default::default(),
            Default::default(),
            self.rate_limit.clone(),
            template_email,
            Audit::new(&contact.audit_log),
            ContactFeatureConfig {
                recipient: contact.recipient.clone().into(),
                owner_name: contact.owner_name.as_str().into(),
                rate_limit: contact.rate_limit.into(),
                confirmation: contact.confirmation,
            },
        ))
    }

    fn rest_server_config(&self) -> RestServerConfig {
        let http = &self.config.http;
        RestServerConfig {
            host: http.host,
            port: http.port,
            real_ip: http.real_ip.as_ref().map(|real_ip| {
                Arc::new(RealIpConfig {
                    header: real_ip.header.clone(),
                    set_from: real_ip.set_from,
                })
            }),
            allowed_origins: http.allowed_origins.clone(),
        }
    }
}
