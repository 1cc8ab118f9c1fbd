//! Table reservations.

use clap::Args;

use bistro_client::forms::ReservationForm;

use super::App;
use crate::error::CliError;
use crate::output;

#[derive(Args)]
pub struct ReserveArgs {
    /// Local date and time, `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    time: String,

    /// Number of guests (1-20)
    #[arg(long, default_value_t = 2)]
    party_size: u32,

    /// Special requests
    #[arg(long)]
    requests: Option<String>,
}

pub async fn reserve(app: &App, args: ReserveArgs) -> Result<(), CliError> {
    app.require_login()?;
    let payload = ReservationForm {
        time: args.time,
        party_size: args.party_size,
        requests: args.requests,
    }
    .validate()?;

    let response = app.api.create_reservation(&payload).await?;
    output::line(
        response
            .message
            .as_deref()
            .unwrap_or("Reservation confirmed"),
    );
    Ok(())
}
