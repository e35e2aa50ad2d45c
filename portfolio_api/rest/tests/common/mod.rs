#![allow(dead_code, reason = "not every test binary uses every helper")]

use std::{
    net::{IpAddr, Ipv4Addr},
    sync::Arc,
};

use portfolio_api_rest::{RealIpConfig, RestServer, RestServerConfig};
use portfolio_core_contact_contracts::ContactFeatureService;
use portfolio_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;

pub const USER_AGENT: &str = "portfolio-rest-tests";
pub const REAL_IP_HEADER: &str = "X-Real-Ip";

pub struct Server {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl Server {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Default)]
pub struct Options {
    pub real_ip: bool,
    pub allowed_origins: Option<Vec<String>>,
}

pub async fn start(contact: impl ContactFeatureService, health: impl HealthFeatureService) -> Server {
    start_with(contact, health, Options::default()).await
}

pub async fn start_with(
    contact: impl ContactFeatureService,
    health: impl HealthFeatureService,
    options: Options,
) -> Server {
    let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
    let listener = TcpListener::bind((localhost, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = RestServerConfig {
        host: localhost,
        port: addr.port(),
        real_ip: options.real_ip.then(|| {
            Arc::new(RealIpConfig {
                header: REAL_IP_HEADER.into(),
                set_from: localhost,
            })
        }),
        allowed_origins: options.allowed_origins.unwrap_or_else(|| vec!["*".into()]),
    };
    let server = RestServer::new(health, contact, config);
    tokio::spawn(server.serve_with_listener(listener));

    Server {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap(),
    }
}
