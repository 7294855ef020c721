//! Contact form submission.

use clap::Args;

use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::error::StorefrontError;
use boutique_storefront::forms::{FormError, SimulatedTransport, contact_form};

use super::Output;

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub topic: String,

    #[arg(long, default_value = "")]
    pub message: String,
}

/// Validate the form and send it through the simulated transport.
///
/// # Errors
///
/// Returns an error if any field is invalid or the submission fails.
pub async fn send(
    config: &StorefrontConfig,
    args: &ContactArgs,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = contact_form();
    for (field, value) in [
        ("name", &args.name),
        ("email", &args.email),
        ("topic", &args.topic),
        ("message", &args.message),
    ] {
        form.on_input(field, value);
    }

    let transport = SimulatedTransport::new(config.submit_delay);
    match form.submit(&transport).await {
        Ok(receipt) => {
            output.emit(&receipt.submission, || println!("{}", receipt.message))?;
            Ok(())
        }
        Err(err) => {
            if let FormError::Invalid(errors) = &err
                && !output.json
            {
                for (field, message) in errors {
                    println!("{field}: {message}");
                }
            }
            Err(StorefrontError::from(err).into())
        }
    }
}
