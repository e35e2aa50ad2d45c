use anyhow::bail;
use clap::Subcommand;
use portfolio_extern_impl::{contact::ContactApiServiceImpl, http::HttpClient};
use portfolio_form::{BannerKind, Event, FormController};
use portfolio_models::contact::ContactField;
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Fill in and submit the contact form of a running server
    Send {
        /// Contact endpoint of the server
        #[arg(long, default_value = "http://127.0.0.1:8000/contact")]
        url: Url,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                url,
                name,
                email,
                subject,
                message,
            } => send(url, [name, email, subject, message]).await,
        }
    }
}

async fn send(url: Url, values: [String; 4]) -> anyhow::Result<()> {
    let api = ContactApiServiceImpl::new(HttpClient::new()?, url);
    let mut controller = FormController::new(api);

    for (field, value) in ContactField::ALL.into_iter().zip(values) {
        controller.dispatch(Event::Input(field, value)).await;
    }
    controller.dispatch(Event::Submit).await;

    let form = controller.form();
    let Some(banner) = form.banner() else {
        for (id, error) in form.error_elements().filter(|(_, e)| !e.is_empty()) {
            eprintln!("{id}: {error}");
        }
        bail!("The form is invalid");
    };

    match banner.kind {
        BannerKind::Success => {
            println!("{}", banner.text);
            Ok(())
        }
        BannerKind::Error => bail!("Submission failed: {}", banner.text),
    }
}
