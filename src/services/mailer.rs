use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::recommendation::Recommendation;
use crate::services::narrative::format_currency;

/// Outbound mail for budget alerts. Without SMTP configuration the mailer
/// degrades to logging, so alert evaluation still runs everywhere.
pub enum Mailer {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    LogOnly,
}

impl Mailer {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let Some(smtp) = &config.smtp else {
            info!("SMTP not configured, budget alerts will be logged instead of sent");
            return Ok(Self::LogOnly);
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
            .map_err(|e| AppError::Email(format!("Invalid SMTP relay '{}': {}", smtp.host, e)))?
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        let from: Mailbox = smtp
            .from
            .parse()
            .map_err(|e| AppError::Email(format!("Invalid sender address '{}': {}", smtp.from, e)))?;

        Ok(Self::Smtp { transport, from })
    }

    pub async fn send(&self, to: &str, subject: &str, html: String) -> AppResult<()> {
        match self {
            Self::Smtp { transport, from } => {
                let message = Message::builder()
                    .from(from.clone())
                    .to(to
                        .parse()
                        .map_err(|e| AppError::Email(format!("Invalid recipient '{}': {}", to, e)))?)
                    .subject(subject)
                    .header(ContentType::TEXT_HTML)
                    .body(html)
                    .map_err(|e| AppError::Email(format!("Failed to build message: {}", e)))?;

                transport
                    .send(message)
                    .await
                    .map_err(|e| AppError::Email(format!("Failed to send email: {}", e)))?;

                info!(to = %to, subject = %subject, "Sent alert email");
                Ok(())
            }
            Self::LogOnly => {
                warn!(to = %to, subject = %subject, "SMTP not configured, alert email not sent");
                Ok(())
            }
        }
    }
}

/// HTML body for a budget alert email: the alert message, a budget status
/// block, and the current AI recommendations.
pub fn budget_alert_html(
    to: &str,
    subject: &str,
    message: &str,
    total_spent: f64,
    monthly_budget: f64,
    recommendations: &[Recommendation],
) -> String {
    let recommendation_blocks: String = recommendations
        .iter()
        .map(|rec| {
            format!(
                r#"<div style="margin-bottom: 10px; padding: 10px; background: #f3f4f6; border-radius: 4px;">{}</div>"#,
                html_escape(&rec.text)
            )
        })
        .collect();

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2 style="color: #4F46E5;">{subject}</h2>
  <p>Hi {to},</p>
  <p>{message}</p>

  <div style="background: #f9fafb; padding: 15px; border-radius: 8px; margin: 20px 0;">
    <h3 style="margin-top: 0;">Current Status</h3>
    <p>Monthly Budget: {budget}</p>
    <p>Total Spent: {spent}</p>
    <p>Remaining: {remaining}</p>
  </div>

  <div style="margin-top: 20px;">
    <h3>AI Recommendations</h3>
    {recommendations}
  </div>

  <div style="margin-top: 20px; padding-top: 20px; border-top: 1px solid #eee;">
    <p style="color: #666; font-size: 12px;">
      You received this email because you enabled budget alerts.
      You can manage your notification settings in your account preferences.
    </p>
  </div>
</div>"#,
        subject = html_escape(subject),
        to = html_escape(to),
        message = html_escape(message),
        budget = format_currency(monthly_budget),
        spent = format_currency(total_spent),
        remaining = format_currency(monthly_budget - total_spent),
        recommendations = recommendation_blocks,
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_html_carries_status_and_recommendations() {
        let recs = vec![Recommendation::new(
            "Reduce dining out".into(),
            "Savings".into(),
            2,
        )];
        let html = budget_alert_html(
            "me@example.com",
            "Budget Alert",
            "You've used 85.0% of your monthly budget",
            850.0,
            1000.0,
            &recs,
        );
        assert!(html.contains("Monthly Budget: $1000.00"));
        assert!(html.contains("Total Spent: $850.00"));
        assert!(html.contains("Remaining: $150.00"));
        assert!(html.contains("Reduce dining out"));
    }

    #[test]
    fn html_escape_neutralizes_markup() {
        assert_eq!(
            html_escape(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;"
        );
    }
}
