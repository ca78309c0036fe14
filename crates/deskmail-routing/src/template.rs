//! Message body rendering

use crate::errors::RoutingError;
use crate::types::{LeaveDetails, Priority, RecipientType, RequestType};

/// Everything a template may draw on for one batch
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    pub sender_name: &'a str,
    pub sender_email: &'a str,
    pub request_type: RequestType,
    pub subject: &'a str,
    pub message: &'a str,
    pub priority: Priority,
    /// Only changes the framing copy
    pub recipient_type: RecipientType,
    pub leave_details: Option<&'a LeaveDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub html: String,
    pub text: String,
}

pub trait MessageTemplate: Send + Sync {
    fn render(&self, ctx: &TemplateContext<'_>) -> Result<RenderedMessage, RoutingError>;
}

/// Escape text for inclusion in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn framing(ctx: &TemplateContext<'_>) -> String {
    match ctx.recipient_type {
        RecipientType::To => format!(
            "{} has submitted a {} for your attention.",
            ctx.sender_name,
            ctx.request_type.as_str().to_lowercase()
        ),
        RecipientType::Cc => format!(
            "You are copied on a {} submitted by {}. No action is required from you.",
            ctx.request_type.as_str().to_lowercase(),
            ctx.sender_name
        ),
    }
}

/// The built-in layout used for every request type
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTemplate;

impl StandardTemplate {
    fn render_html(&self, ctx: &TemplateContext<'_>) -> String {
        let accent = match ctx.priority {
            Priority::Urgent => "#dc3545",
            Priority::High => "#fd7e14",
            Priority::Normal => "#0066cc",
            Priority::Low => "#6c757d",
        };

        let body = escape_html(ctx.message).replace('\n', "<br>\n");

        let mut html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{subject}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ border-bottom: 3px solid {accent}; padding-bottom: 10px; margin-bottom: 20px; }}
        .meta {{ color: #666; font-size: 14px; }}
        .message {{ background-color: #f8f9fa; border-radius: 4px; padding: 16px; }}
        table.leave td {{ padding: 4px 12px 4px 0; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h2>{request_type}: {subject}</h2>
            <p class="meta">Priority: <strong>{priority}</strong></p>
        </div>
        <p>{framing}</p>
        <div class="message">{body}</div>
"#,
            subject = escape_html(ctx.subject),
            accent = accent,
            request_type = escape_html(ctx.request_type.as_str()),
            priority = ctx.priority.as_str(),
            framing = escape_html(&framing(ctx)),
            body = body,
        );

        if let Some(leave) = ctx.leave_details {
            html.push_str(&format!(
                r#"        <h3>Leave details</h3>
        <table class="leave">
            <tr><td>Type</td><td>{leave_type}</td></tr>
            <tr><td>From</td><td>{from_date} ({from_session})</td></tr>
            <tr><td>To</td><td>{to_date} ({to_session})</td></tr>
            <tr><td>Duration</td><td>{days} day(s)</td></tr>
        </table>
"#,
                leave_type = escape_html(&leave.leave_type),
                from_date = leave.from_date.format("%b %d, %Y"),
                from_session = escape_html(&leave.from_session),
                to_date = leave.to_date.format("%b %d, %Y"),
                to_session = escape_html(&leave.to_session),
                days = leave.duration_days(),
            ));
        }

        html.push_str(&format!(
            r#"        <p class="meta">Sent by {name} &lt;{email}&gt;. Reply to this email to respond directly.</p>
    </div>
</body>
</html>"#,
            name = escape_html(ctx.sender_name),
            email = escape_html(ctx.sender_email),
        ));

        html
    }

    fn render_text(&self, ctx: &TemplateContext<'_>) -> String {
        let mut text = format!(
            "{}: {}\nPriority: {}\n\n{}\n\n{}\n",
            ctx.request_type,
            ctx.subject,
            ctx.priority,
            framing(ctx),
            ctx.message
        );

        if let Some(leave) = ctx.leave_details {
            text.push_str(&format!(
                "\nLeave details\n  Type:     {}\n  From:     {} ({})\n  To:       {} ({})\n  Duration: {} day(s)\n",
                leave.leave_type,
                leave.from_date.format("%b %d, %Y"),
                leave.from_session,
                leave.to_date.format("%b %d, %Y"),
                leave.to_session,
                leave.duration_days()
            ));
        }

        text.push_str(&format!(
            "\nSent by {} <{}>. Reply to this email to respond directly.\n",
            ctx.sender_name, ctx.sender_email
        ));
        text
    }
}

impl MessageTemplate for StandardTemplate {
    fn render(&self, ctx: &TemplateContext<'_>) -> Result<RenderedMessage, RoutingError> {
        if ctx.message.trim().is_empty() {
            return Err(RoutingError::Template(
                "Cannot render a message with an empty body".to_string(),
            ));
        }

        Ok(RenderedMessage {
            html: self.render_html(ctx),
            text: self.render_text(ctx),
        })
    }
}
