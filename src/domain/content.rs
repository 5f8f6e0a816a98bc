/// Static site content: profile, typing phrases, projects, skills, services.
///
/// The built-in catalog is compiled in. A `content.toml` file can replace
/// any top-level section; sections it leaves out keep the built-in data.
/// Content is loaded once at startup and never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ContentError;

// ── Types ──

/// Closed set of project categories.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
pub enum Category {
    #[serde(rename = "Customer Support")]
    CustomerSupport,
    #[serde(rename = "Sales Automation")]
    SalesAutomation,
    #[serde(rename = "Data Automation")]
    DataAutomation,
    #[serde(rename = "Workflow")]
    Workflow,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::CustomerSupport,
        Category::SalesAutomation,
        Category::DataAutomation,
        Category::Workflow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::CustomerSupport => "Customer Support",
            Category::SalesAutomation => "Sales Automation",
            Category::DataAutomation => "Data Automation",
            Category::Workflow => "Workflow",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub category: Category,
    pub description: String,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    /// External image URL. Shown as a link, never fetched.
    #[serde(default, alias = "image")]
    pub image_ref: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Profile {
    pub name: String,
    pub initials: String,
    pub badge: String,
    pub summary: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    /// Proficiency, 0..=100.
    pub level: u8,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
    /// Accent color as `#rrggbb`.
    #[serde(default = "default_accent")]
    pub accent: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

fn default_accent() -> String { "#00f5ff".into() }

impl Service {
    /// The accent as an RGB triple, if it is a well-formed `#rrggbb`.
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.accent.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Everything the page renders, in display order.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub profile: Profile,
    pub phrases: Vec<String>,
    pub stats: Vec<Stat>,
    pub highlights: Vec<String>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub services: Vec<Service>,
    pub social_links: Vec<SocialLink>,
}

// ── TOML Schema ──

#[derive(Deserialize, Debug, Default)]
struct TomlCatalog {
    profile: Option<Profile>,
    phrases: Option<Vec<String>>,
    stats: Option<Vec<Stat>>,
    highlights: Option<Vec<String>>,
    skills: Option<Vec<Skill>>,
    projects: Option<Vec<Project>>,
    services: Option<Vec<Service>>,
    social_links: Option<Vec<SocialLink>>,
}

// ── Loading ──

impl Catalog {
    /// Parse a catalog override. Missing sections keep the built-in data.
    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        let t: TomlCatalog = toml::from_str(text)?;
        let base = Catalog::builtin();
        let catalog = Catalog {
            profile: t.profile.unwrap_or(base.profile),
            phrases: t.phrases.unwrap_or(base.phrases),
            stats: t.stats.unwrap_or(base.stats),
            highlights: t.highlights.unwrap_or(base.highlights),
            skills: t.skills.unwrap_or(base.skills),
            projects: t.projects.unwrap_or(base.projects),
            services: t.services.unwrap_or(base.services),
            social_links: t.social_links.unwrap_or(base.social_links),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, falling back to the built-in catalog on any error.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else { return Catalog::builtin() };
        match Catalog::load(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), projects = catalog.projects.len(), "content loaded");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "using built-in content");
                Catalog::builtin()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.phrases.is_empty() {
            return Err(ContentError::NoPhrases);
        }
        let mut seen = HashSet::new();
        for p in &self.projects {
            if !seen.insert(p.id) {
                return Err(ContentError::DuplicateProject(p.id));
            }
        }
        Ok(())
    }

    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

// ── Built-in content ──

impl Catalog {
    pub fn builtin() -> Self {
        Catalog {
            profile: Profile {
                name: "Ali Raza".into(),
                initials: "AR".into(),
                badge: "Available for Projects".into(),
                summary: "I build AI-powered automations and intelligent agents that help businesses \
                          work smarter, faster, and more efficiently. Transforming complex workflows \
                          into seamless automated solutions."
                    .into(),
            },
            phrases: vec![
                "AI Agent Developer".into(),
                "Automation Specialist".into(),
                "Workflow Architect".into(),
                "AI Solutions Expert".into(),
            ],
            stats: vec![
                stat("50+", "Projects Completed"),
                stat("30+", "Happy Clients"),
                stat("3+", "Years Experience"),
            ],
            highlights: vec![
                "AI-powered customer support agents".into(),
                "Workflow automation for SMBs and SaaS".into(),
                "Lead qualification and sales automation".into(),
                "Data extraction, reporting, and analytics".into(),
                "Internal operations optimization".into(),
            ],
            skills: vec![
                skill("n8n", "Workflow automation builder", 95),
                skill("OpenRouter", "AI API integration", 90),
                skill("Supabase", "Backend database for AI", 88),
                skill("Airtable", "Data management platform", 92),
                skill("Google Sheets", "Spreadsheet automation", 95),
                skill("Twilio", "Communication APIs", 85),
                skill("REST APIs", "API integration & design", 93),
                skill("AI Agents", "Intelligent automation", 90),
            ],
            projects: builtin_projects(),
            services: vec![
                service("AI Customer Support Agents",
                    "Build intelligent chatbots and AI agents that handle customer inquiries 24/7 with human-like accuracy.",
                    "#00f5ff"),
                service("Lead Qualification & Sales Automation",
                    "Automate your sales pipeline from lead capture to qualification, scoring, and nurturing.",
                    "#bf00ff"),
                service("Workflow Automation for SMBs",
                    "Streamline your business operations with custom n8n workflows that eliminate repetitive tasks.",
                    "#ff00d4"),
                service("Data Extraction & Analytics",
                    "Transform raw data into actionable insights with automated reporting and analytics pipelines.",
                    "#00a2ff"),
                service("Internal Operations Optimization",
                    "Optimize your internal processes with AI-powered automation that boosts team productivity.",
                    "#00f5ff"),
                service("API Integration & Development",
                    "Connect all your tools and platforms with seamless API integrations and custom connectors.",
                    "#bf00ff"),
            ],
            social_links: vec![
                link("LinkedIn", "https://www.linkedin.com/in/ali-raza-9816213a4"),
                link("Upwork", "https://www.upwork.com/freelancers/~0159f86a70c47f0ac1"),
                link("Freelancer", "https://www.freelancer.com/u/aliraza799?sb=t"),
                link("Email Me", "mailto:alirazaaa9980@gmail.com"),
            ],
        }
    }
}

fn builtin_projects() -> Vec<Project> {
    vec![
        project(1, "AI Customer Support Agent", Category::CustomerSupport,
            "Production-ready AI customer support system that classifies intent, answers from a database, \
             tracks orders, and escalates complex cases to humans with ticket creation.",
            &["Faster response times", "Zero policy hallucinations", "Seamless AI-to-human escalation"],
            &["n8n", "Supabase", "OpenRouter", "Webhooks", "HTTP APIs", "AI Agents"],
            "https://i.postimg.cc/vBHzSycP/Screenshot_select_area_20260201151541.png"),
        project(2, "AI-Powered Lead Management System", Category::SalesAutomation,
            "AI automation that instantly captures inbound social leads, asks qualifying questions, \
             understands intent, and flags high-value opportunities.",
            &["Prevents lead loss", "Instant engagement", "Focus on high-intent leads only"],
            &["n8n", "AI Agents", "Webhooks", "CRM Logic", "OpenRouter", "APIs"],
            "https://i.postimg.cc/NjmpKb39/Screenshot_select_area_20260201151412.png"),
        project(3, "Automated Invoice Reminder System", Category::Workflow,
            "A deterministic automation that tracks overdue invoices and sends controlled reminders \
             without duplicates or client spam.",
            &["Reduced missed payments", "Reliable reminders", "Full state control"],
            &["n8n", "Google Sheets", "Email (SMTP)", "Date Logic", "Workflow State Management"],
            "https://i.postimg.cc/7Z0m5XFb/Screenshot_select_area_20260201151430.png"),
        project(4, "Automated Lead Capture & Reporting", Category::DataAutomation,
            "Simple automation that captures form leads, stores them in Google Sheets, and sends daily \
             lead summary reports automatically.",
            &["Better visibility", "Zero manual reporting", "Cleaner lead data"],
            &["n8n", "Google Sheets", "Forms", "Email Automation", "Triggers & Schedulers"],
            "https://i.postimg.cc/X7TsNtzf/Screenshot_select_area_20260201151445.png"),
        project(5, "Clinic Appointment Booking Automation", Category::Workflow,
            "Messaging-based appointment booking system that collects patient details and notifies \
             clinic staff instantly.",
            &["Reduced admin workload", "Faster bookings", "Instant staff alerts"],
            &["n8n", "Telegram / WhatsApp", "Google Sheets", "Email Automation", "Webhooks"],
            "https://i.postimg.cc/0yDczZTJ/Screenshot_select_area_20260201151459.png"),
        project(6, "AI Email Classification & Reply Assistant", Category::CustomerSupport,
            "AI-powered email system that classifies incoming emails, applies labels, and generates \
             context-aware draft replies with human review.",
            &["Organized inbox", "Faster replies", "Human-in-the-loop safety"],
            &["n8n", "Gmail API", "AI Agent", "OpenRouter", "Structured Outputs"],
            "https://i.postimg.cc/XJ78DWpQ/Screenshot_select_area_20260201151516.png"),
        project(7, "AI Phishing & Threat Detection System", Category::DataAutomation,
            "Multi-agent AI system that detects phishing and malicious content across Gmail and web apps \
             using intent analysis and risk-weighted decisions.",
            &["Reduced phishing risk", "Fewer false positives", "Real-time security verdicts"],
            &["n8n", "AI Agents", "OpenRouter", "Gmail API", "Webhooks", "Prompt Engineering"],
            "https://i.postimg.cc/htTpXMkX/Screenshot_select_area_20260201151350.png"),
    ]
}

fn project(
    id: u32, title: &str, category: Category, description: &str,
    metrics: &[&str], tools: &[&str], image_ref: &str,
) -> Project {
    Project {
        id,
        title: title.into(),
        category,
        description: description.into(),
        metrics: metrics.iter().map(|s| s.to_string()).collect(),
        tools: tools.iter().map(|s| s.to_string()).collect(),
        image_ref: image_ref.into(),
    }
}

fn stat(value: &str, label: &str) -> Stat {
    Stat { value: value.into(), label: label.into() }
}

fn skill(name: &str, description: &str, level: u8) -> Skill {
    Skill { name: name.into(), description: description.into(), level }
}

fn service(title: &str, description: &str, accent: &str) -> Service {
    Service { title: title.into(), description: description.into(), accent: accent.into() }
}

fn link(label: &str, href: &str) -> SocialLink {
    SocialLink { label: label.into(), href: href.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let c = Catalog::builtin();
        assert!(c.validate().is_ok());
        assert_eq!(c.projects.len(), 7);
        assert_eq!(c.phrases.len(), 4);
        assert_eq!(c.project(3).map(|p| p.category), Some(Category::Workflow));
        assert!(c.project(99).is_none());
    }

    #[test]
    fn service_accent_parses_hex() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.services[0].accent_rgb(), Some((0, 245, 255)));
        assert_eq!(catalog.services[1].accent_rgb(), Some((191, 0, 255)));
        let bad = Service { title: "x".into(), description: "y".into(), accent: "teal".into() };
        assert_eq!(bad.accent_rgb(), None);
    }

    #[test]
    fn category_labels_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), Some(c));
        }
        assert_eq!(Category::from_label("Marketing"), None);
        assert_eq!(Category::from_label("workflow"), None);
    }

    #[test]
    fn partial_override_keeps_other_sections() {
        let text = r#"
            phrases = ["Rust Developer"]

            [[projects]]
            id = 10
            title = "Terminal Portfolio"
            category = "Workflow"
            description = "This very program."
            image = "https://example.com/shot.png"
        "#;
        let c = Catalog::from_toml_str(text).unwrap();
        assert_eq!(c.phrases, vec!["Rust Developer".to_string()]);
        assert_eq!(c.projects.len(), 1);
        assert_eq!(c.projects[0].image_ref, "https://example.com/shot.png");
        assert!(c.projects[0].metrics.is_empty());
        assert_eq!(c.skills, Catalog::builtin().skills);
    }

    #[test]
    fn example_content_file_parses() {
        let c = Catalog::from_toml_str(include_str!("../../content.example.toml")).unwrap();
        assert_eq!(c.phrases.len(), 2);
        assert_eq!(c.projects.len(), 2);
        assert_eq!(c.projects[1].category, Category::SalesAutomation);
        assert_eq!(c.services, Catalog::builtin().services);
    }

    #[test]
    fn rejects_unknown_category() {
        let text = r#"
            [[projects]]
            id = 1
            title = "x"
            category = "Marketing"
            description = "y"
        "#;
        assert!(matches!(Catalog::from_toml_str(text), Err(ContentError::Parse(_))));
    }

    #[test]
    fn rejects_duplicate_ids_and_empty_phrases() {
        let dup = r#"
            [[projects]]
            id = 1
            title = "a"
            category = "Workflow"
            description = "a"

            [[projects]]
            id = 1
            title = "b"
            category = "Workflow"
            description = "b"
        "#;
        assert!(matches!(Catalog::from_toml_str(dup), Err(ContentError::DuplicateProject(1))));
        assert!(matches!(Catalog::from_toml_str("phrases = []"), Err(ContentError::NoPhrases)));
    }

    #[test]
    fn missing_file_falls_back() {
        let c = Catalog::load_or_builtin(Some(Path::new("/nonexistent/folio/content.toml")));
        assert_eq!(c.projects.len(), Catalog::builtin().projects.len());
    }
}
