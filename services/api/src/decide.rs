use chrono::{Local, NaiveDate};
use clap::Args;
use loan_decision::decision::{
    Decision, DecisionEngine, DecisionError, DecisionResponse, ErrorKind, LoanRequest,
    UNEXPECTED_ERROR_MESSAGE,
};
use loan_decision::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Estonian personal identification code (11 digits)
    #[arg(long)]
    pub(crate) personal_code: String,
    /// Requested loan amount in euros
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) amount: i64,
    /// Requested loan period in months
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) period: i64,
    /// Evaluation date used for the age check (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the HTTP response payload instead of a summary line
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let DecideArgs {
        personal_code,
        amount,
        period,
        today,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let request = LoanRequest::new(personal_code, amount, period);
    let outcome = DecisionEngine::default().decide(&request, today);

    if json {
        println!("{}", render_json(&outcome));
    } else {
        println!("{}", render_summary(&request, &outcome));
    }

    outcome.map(|_| ()).map_err(AppError::from)
}

pub(crate) fn render_summary(
    request: &LoanRequest,
    outcome: &Result<Decision, DecisionError>,
) -> String {
    match outcome {
        Ok(decision) => format!(
            "Approved: {} EUR over {} months (requested {} EUR over {} months)",
            decision.loan_amount, decision.loan_period, request.loan_amount, request.loan_period
        ),
        Err(err) => format!("Rejected: {}", public_message(err)),
    }
}

pub(crate) fn render_json(outcome: &Result<Decision, DecisionError>) -> String {
    let response = match outcome {
        Ok(decision) => DecisionResponse::approved(*decision),
        Err(err) => DecisionResponse::rejected(public_message(err)),
    };
    serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
}

fn public_message(err: &DecisionError) -> String {
    match err.kind() {
        ErrorKind::Internal => UNEXPECTED_ERROR_MESSAGE.to_string(),
        ErrorKind::BadRequest | ErrorKind::NotFound => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LoanRequest {
        LoanRequest::new("38506155503", 4000, 12)
    }

    #[test]
    fn summary_describes_offer() {
        let outcome = Ok(Decision {
            loan_amount: 3600,
            loan_period: 12,
        });
        assert_eq!(
            render_summary(&request(), &outcome),
            "Approved: 3600 EUR over 12 months (requested 4000 EUR over 12 months)"
        );
    }

    #[test]
    fn json_output_mirrors_http_payload() {
        let rendered = render_json(&Err(DecisionError::NoValidLoan));
        let payload: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(
            payload,
            serde_json::json!({
                "loanAmount": null,
                "loanPeriod": null,
                "errorMessage": "No valid loan found!",
            })
        );
    }

    #[test]
    fn unexpected_errors_are_not_echoed() {
        let outcome = Err(DecisionError::Unexpected("band table empty".to_string()));
        assert_eq!(
            render_summary(&request(), &outcome),
            "Rejected: An unexpected error occurred"
        );
    }
}
