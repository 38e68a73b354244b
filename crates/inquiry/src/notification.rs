use askama::Template;
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc2822};

use crate::Inquiry;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("failed to render template: {0}")]
    Render(#[from] askama::Error),
}

/// Inquiry notification HTML template. Every field is HTML-escaped.
#[derive(Template)]
#[template(path = "emails/inquiry.html")]
struct InquiryHtmlTemplate<'a> {
    inquiry: &'a Inquiry,
    budget: Option<&'a str>,
    sent_at: &'a str,
}

/// Inquiry notification plain text template
#[derive(Template)]
#[template(path = "emails/inquiry.txt")]
struct InquiryTextTemplate<'a> {
    inquiry: &'a Inquiry,
    budget: Option<&'a str>,
    sent_at: &'a str,
}

/// Rendered notification for the studio inbox
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: String,
    pub html: String,
    pub plain: String,
}

impl Notification {
    pub fn compose(inquiry: &Inquiry, sent_at: OffsetDateTime) -> Result<Self, ComposeError> {
        let sent_at = sent_at.format(&Rfc2822)?;
        let budget = inquiry.budget.as_deref();

        let html = InquiryHtmlTemplate {
            inquiry,
            budget,
            sent_at: &sent_at,
        }
        .render()?;

        let plain = InquiryTextTemplate {
            inquiry,
            budget,
            sent_at: &sent_at,
        }
        .render()?;

        Ok(Self {
            subject: inquiry.subject(),
            html,
            plain,
        })
    }
}
