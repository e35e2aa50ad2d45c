use portfolio_audit_file::FileAuditLog;
use portfolio_core_contact_impl::ContactFeatureServiceImpl;
use portfolio_core_health_impl::HealthFeatureServiceImpl;
use portfolio_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use portfolio_shared_impl::{hash::HashServiceImpl, time::TimeServiceImpl};
use portfolio_templates_impl::TemplateServiceImpl;

use crate::rate_limit::RateLimitBackend;

// API
pub type RestServer = portfolio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Storage
pub type RateLimit = RateLimitBackend;
pub type Audit = FileAuditLog;

// Email
pub type Email = EmailServiceImpl;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Templates
pub type Template = TemplateServiceImpl;

// Shared
pub type Hash = HashServiceImpl;
pub type Time = TimeServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Email, RateLimit>;
pub type ContactFeature = ContactFeatureServiceImpl<Time, Hash, RateLimit, TemplateEmail, Audit>;
