use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: String,
    pub title: String,
    pub min_investment: u64,
    pub max_investment: u64,
    pub return_percentage: f64,
    pub duration_months: u32,
    pub description: String,
    pub is_popular: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update; absent fields keep their current value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SchemeUpdate {
    pub title: Option<String>,
    pub min_investment: Option<u64>,
    pub max_investment: Option<u64>,
    pub return_percentage: Option<f64>,
    pub duration_months: Option<u32>,
    pub description: Option<String>,
    pub is_popular: Option<bool>,
    pub is_active: Option<bool>,
}

impl Scheme {
    pub fn apply(&mut self, update: SchemeUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(min) = update.min_investment {
            self.min_investment = min;
        }
        if let Some(max) = update.max_investment {
            self.max_investment = max;
        }
        if let Some(pct) = update.return_percentage {
            self.return_percentage = pct;
        }
        if let Some(months) = update.duration_months {
            self.duration_months = months;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(popular) = update.is_popular {
            self.is_popular = popular;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub telegram_link: String,
    pub whatsapp_number: String,
    pub contact_email: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            telegram_link: "https://t.me/wealthx_invest".to_string(),
            whatsapp_number: String::new(),
            contact_email: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SettingsUpdate {
    pub telegram_link: Option<String>,
    pub whatsapp_number: Option<String>,
    pub contact_email: Option<String>,
}

impl SiteSettings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(link) = update.telegram_link {
            self.telegram_link = link;
        }
        if let Some(number) = update.whatsapp_number {
            self.whatsapp_number = number;
        }
        if let Some(email) = update.contact_email {
            self.contact_email = email;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}
