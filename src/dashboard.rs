//! View models for the portal's pages.
//!
//! The UI shell renders these; the backend only decides what each page shows.
//! Panels are still placeholders backed by fixed mock data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{access::Role, auth::Session};

pub const BRAND: &str = "Staycation Haven";

/// Panel
///
/// The sidebar sections of every role's dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Bookings,
    Payments,
    Deliverables,
    Cleaners,
    Deposits,
    Inventory,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Bookings,
        Panel::Payments,
        Panel::Deliverables,
        Panel::Cleaners,
        Panel::Deposits,
        Panel::Inventory,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Panel::Bookings => "bookings",
            Panel::Payments => "payments",
            Panel::Deliverables => "deliverables",
            Panel::Cleaners => "cleaners",
            Panel::Deposits => "deposits",
            Panel::Inventory => "inventory",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Bookings => "Bookings",
            Panel::Payments => "Payments",
            Panel::Deliverables => "Deliverables",
            Panel::Cleaners => "Cleaners",
            Panel::Deposits => "Deposits",
            Panel::Inventory => "Inventory",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Panel::Bookings => "Manage all customer bookings and reservations here.",
            Panel::Payments => "Track and manage payment transactions.",
            Panel::Deliverables => "Manage and track service deliverables.",
            Panel::Cleaners => "Manage cleaner schedules and assignments.",
            Panel::Deposits => "Track customer deposits and refunds.",
            Panel::Inventory => "Manage property inventory and supplies.",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Panel> {
        Panel::ALL.into_iter().find(|panel| panel.slug() == slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub href: String,
}

/// ShellUser
///
/// The account card in the sidebar footer.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ShellUser {
    pub name: String,
    pub email: String,
    pub initial: String,
}

/// DashboardShell
///
/// The frame around every admin page: branding, navigation, and the signed-in account.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DashboardShell {
    pub brand: String,
    pub portal: String,
    pub role: Role,
    pub title: String,
    pub welcome: String,
    pub active: String,
    pub nav: Vec<NavItem>,
    pub user: ShellUser,
    pub sign_out_href: String,
}

/// Builds the shell for `role` with `active` highlighted.
pub fn dashboard_shell(role: Role, active: Panel, session: &Session) -> DashboardShell {
    let home = role.home();
    let nav = Panel::ALL
        .into_iter()
        .map(|panel| NavItem {
            id: panel.slug().to_string(),
            label: panel.label().to_string(),
            href: format!("{}/{}", home, panel.slug()),
        })
        .collect();

    let name = session
        .name
        .clone()
        .unwrap_or_else(|| format!("{} Account", role.as_str().to_uppercase()));
    let email = session
        .email
        .clone()
        .unwrap_or_else(|| format!("{}@staycation.com", role.area()));
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    DashboardShell {
        brand: BRAND.to_string(),
        portal: role.portal_name().to_string(),
        role,
        title: active.label().to_string(),
        welcome: "Welcome back! Here's what's happening today.".to_string(),
        active: active.slug().to_string(),
        nav,
        user: ShellUser {
            name,
            email,
            initial,
        },
        sign_out_href: "/api/auth/signout?callbackUrl=/admin/login".to_string(),
    }
}

/// PanelView
///
/// Placeholder content for one sidebar section.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PanelView {
    pub panel: String,
    pub title: String,
    pub description: String,
    pub shell: DashboardShell,
}

pub fn panel_view(role: Role, panel: Panel, session: &Session) -> PanelView {
    PanelView {
        panel: panel.slug().to_string(),
        title: panel.label().to_string(),
        description: panel.description().to_string(),
        shell: dashboard_shell(role, panel, session),
    }
}

// --- Notifications & Messages ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

fn notification(
    id: &str,
    title: &str,
    description: &str,
    timestamp: &str,
    kind: NotificationKind,
) -> Notification {
    Notification {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        timestamp: timestamp.to_string(),
        kind,
    }
}

/// Fixed feed shown until bookings and payments are wired to real data.
pub fn mock_notifications() -> Vec<Notification> {
    vec![
        notification(
            "1",
            "New booking pending approval",
            "A new booking for Haven 2 requires CSR confirmation.",
            "2 mins ago",
            NotificationKind::Info,
        ),
        notification(
            "2",
            "Payment received",
            "₱12,500 from Emily Brown was confirmed.",
            "15 mins ago",
            NotificationKind::Success,
        ),
        notification(
            "3",
            "Guest check-in reminder",
            "Mike Wilson will arrive today at 3:00 PM.",
            "1 hr ago",
            NotificationKind::Warning,
        ),
        notification(
            "4",
            "Inventory restocked",
            "Housekeeping restocked linens for Haven 1.",
            "2 hrs ago",
            NotificationKind::Info,
        ),
    ]
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MessageKind {
    Unread,
    Urgent,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub preview: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

pub fn mock_messages() -> Vec<Message> {
    let message = |id: &str,
                   sender: &str,
                   subject: &str,
                   preview: &str,
                   timestamp: &str,
                   kind: MessageKind| {
        Message {
            id: id.to_string(),
            sender: sender.to_string(),
            subject: subject.to_string(),
            preview: preview.to_string(),
            timestamp: timestamp.to_string(),
            kind,
        }
    };

    vec![
        message(
            "msg-1",
            "Emily Brown",
            "Clarification about payment receipt",
            "Hello, could you confirm if my receipt was sent to the right email?",
            "5 mins ago",
            MessageKind::Unread,
        ),
        message(
            "msg-2",
            "Facility Team",
            "Urgent: Room 204 maintenance verification",
            "Can CSR confirm that the postponed maintenance visit is approved?",
            "32 mins ago",
            MessageKind::Urgent,
        ),
        message(
            "msg-3",
            "Michael Cruz",
            "Late check-in assistance",
            "Arriving past midnight, may I still get full concierge support?",
            "1 hr ago",
            MessageKind::Info,
        ),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NotificationFeed {
    pub title: String,
    pub unread: usize,
    pub items: Vec<Notification>,
    pub shell: DashboardShell,
}

pub fn notification_feed(role: Role, session: &Session) -> NotificationFeed {
    let items = mock_notifications();
    NotificationFeed {
        title: "Notifications".to_string(),
        unread: items.len(),
        items,
        shell: dashboard_shell(role, Panel::Bookings, session),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MessageFeed {
    pub title: String,
    pub unread: usize,
    pub items: Vec<Message>,
    pub shell: DashboardShell,
}

pub fn message_feed(role: Role, session: &Session) -> MessageFeed {
    let items = mock_messages();
    MessageFeed {
        title: "Messages".to_string(),
        unread: items
            .iter()
            .filter(|m| m.kind != MessageKind::Info)
            .count(),
        items,
        shell: dashboard_shell(role, Panel::Bookings, session),
    }
}

// --- Public Pages ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginPage {
    pub brand: String,
    pub title: String,
    pub subtitle: String,
}

pub fn login_page() -> LoginPage {
    LoginPage {
        brand: BRAND.to_string(),
        title: "Admin Login".to_string(),
        subtitle: "Sign in with your staff account to continue.".to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CustomerPage {
    pub brand: String,
    pub page: String,
    pub path: String,
}

pub fn customer_page(page: &str, path: &str) -> CustomerPage {
    CustomerPage {
        brand: BRAND.to_string(),
        page: page.to_string(),
        path: path.to_string(),
    }
}
