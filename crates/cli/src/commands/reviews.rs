//! Reviews: post one, list all.

use clap::Args;

use bistro_client::forms::{ReviewForm, ReviewTarget};

use super::App;
use crate::error::CliError;
use crate::output;

#[derive(Args)]
pub struct ReviewArgs {
    /// `item:<id>`, `combo:<id>` or a bare item id
    target: ReviewTarget,

    /// Stars, 1 to 5
    #[arg(short, long)]
    rating: u8,

    #[arg(short, long)]
    comment: Option<String>,
}

pub async fn review(app: &App, args: ReviewArgs) -> Result<(), CliError> {
    app.require_login()?;
    let (target, payload) = ReviewForm {
        target: Some(args.target),
        rating: args.rating,
        comment: args.comment,
    }
    .validate()?;

    let response = app.api.create_review(target, &payload).await?;
    output::line(response.message.as_deref().unwrap_or("Review added"));
    Ok(())
}

pub async fn list(app: &App) -> Result<(), CliError> {
    let reviews = app.api.reviews().await?;
    output::heading("Reviews");
    if reviews.is_empty() {
        output::line("No reviews yet.");
        return Ok(());
    }
    for review in reviews {
        output::line(format_args!(
            "{}/5  {:<24}{:<16}{}",
            review.rating,
            review.item_name,
            review.user,
            review.date.format("%Y-%m-%d")
        ));
        if let Some(comment) = review.comment.as_deref().filter(|c| !c.is_empty()) {
            output::line(format_args!("      {comment}"));
        }
    }
    Ok(())
}
