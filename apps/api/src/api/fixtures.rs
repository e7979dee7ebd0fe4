//! Demo data served in mock mode.

use crate::models::analytics::{DailyViews, DeviceCount, PageViews, ReferrerCount};
use crate::models::portfolio::{
    Certification, Education, Experience, PersonalInfo, Project, Skill, SocialLink,
};
use crate::models::{
    Portfolio, PortfolioAnalytics, PortfolioContent, PortfolioStatus, Resume, SubscriptionTier,
    User,
};

/// The one identity the mock backend accepts.
pub struct DemoIdentity {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub id: &'static str,
}

pub const DEMO_USER: DemoIdentity = DemoIdentity {
    email: "demo@example.com",
    password: "demo123",
    name: "Demo User",
    id: "demo-user-123",
};

pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";
pub const MOCK_REFRESH_TOKEN: &str = "mock-refresh-token";

/// Read-only fixture set, built once per mock backend.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub user: User,
    pub resumes: Vec<Resume>,
    pub portfolio: Portfolio,
    pub analytics: PortfolioAnalytics,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            user: mock_user(),
            resumes: mock_resumes(),
            portfolio: mock_portfolio(),
            analytics: mock_analytics(),
        }
    }
}

pub fn mock_user() -> User {
    User {
        id: DEMO_USER.id.to_string(),
        email: DEMO_USER.email.to_string(),
        name: DEMO_USER.name.to_string(),
        avatar_url: None,
        subscription_status: SubscriptionTier::Premium,
        usage_count: 45,
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-15T10:30:00Z".to_string(),
    }
}

pub fn mock_resumes() -> Vec<Resume> {
    vec![
        Resume {
            id: "resume-1".to_string(),
            user_id: DEMO_USER.id.to_string(),
            original_content: "Software Engineer with 5+ years of experience...".to_string(),
            job_description:
                "Senior Software Engineer at Google - Full-stack development, React, Node.js"
                    .to_string(),
            ai_generated_content: Some(
                "Experienced Software Engineer with 5+ years of expertise in full-stack development..."
                    .to_string(),
            ),
            template_used: "tech-focused".to_string(),
            compatibility_score: Some(92),
            s3_file_path: Some("/resumes/resume-1.pdf".to_string()),
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: "2024-01-15T14:45:00Z".to_string(),
        },
        Resume {
            id: "resume-2".to_string(),
            user_id: DEMO_USER.id.to_string(),
            original_content: "Product Manager with experience in agile methodologies..."
                .to_string(),
            job_description: "Product Manager at Microsoft - Agile, Product Strategy".to_string(),
            ai_generated_content: Some(
                "Strategic Product Manager with proven track record in agile product development..."
                    .to_string(),
            ),
            template_used: "modern".to_string(),
            compatibility_score: Some(87),
            s3_file_path: Some("/resumes/resume-2.pdf".to_string()),
            created_at: "2024-01-10T09:15:00Z".to_string(),
            updated_at: "2024-01-12T16:20:00Z".to_string(),
        },
        Resume {
            id: "resume-3".to_string(),
            user_id: DEMO_USER.id.to_string(),
            original_content: "UX Designer portfolio and experience...".to_string(),
            job_description: "UX Designer - User research".to_string(),
            ai_generated_content: None,
            template_used: "creative".to_string(),
            compatibility_score: None,
            s3_file_path: Some("/resumes/resume-3.pdf".to_string()),
            created_at: "2024-01-08T11:00:00Z".to_string(),
            updated_at: "2024-01-08T11:00:00Z".to_string(),
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn skill(name: &str, level: u8, category: &str) -> Skill {
    Skill {
        name: name.to_string(),
        level,
        category: category.to_string(),
    }
}

fn social(platform: &str, url: &str, icon: &str) -> SocialLink {
    SocialLink {
        platform: platform.to_string(),
        url: url.to_string(),
        icon: icon.to_string(),
    }
}

pub fn mock_portfolio_content() -> PortfolioContent {
    PortfolioContent {
        personal_info: PersonalInfo {
            name: DEMO_USER.name.to_string(),
            title: "Senior Software Engineer".to_string(),
            email: DEMO_USER.email.to_string(),
            phone: Some("+1 (555) 123-4567".to_string()),
            location: Some("San Francisco, CA".to_string()),
            summary: "Experienced software engineer with a passion for building scalable web \
                      applications and leading technical teams. Specialized in full-stack \
                      development with modern JavaScript frameworks."
                .to_string(),
        },
        skills: vec![
            skill("React", 95, "Frontend"),
            skill("Node.js", 90, "Backend"),
            skill("TypeScript", 88, "Language"),
            skill("Python", 85, "Language"),
            skill("AWS", 80, "Cloud"),
            skill("Docker", 75, "DevOps"),
            skill("PostgreSQL", 85, "Database"),
            skill("GraphQL", 82, "API"),
        ],
        experience: vec![
            Experience {
                company: "Tech Corp".to_string(),
                position: "Senior Software Engineer".to_string(),
                start_date: "2022-01-01".to_string(),
                end_date: None,
                description:
                    "Leading development of customer-facing web applications using React and Node.js"
                        .to_string(),
                achievements: strings(&[
                    "Increased application performance by 40% through optimization",
                    "Led migration to microservices architecture",
                    "Mentored 5 junior developers",
                ]),
                technologies: strings(&["React", "Node.js", "TypeScript", "AWS", "Docker"]),
            },
            Experience {
                company: "StartupXYZ".to_string(),
                position: "Full Stack Developer".to_string(),
                start_date: "2020-06-01".to_string(),
                end_date: Some("2021-12-31".to_string()),
                description: "Developed and maintained multiple web applications from scratch"
                    .to_string(),
                achievements: strings(&[
                    "Built MVP in 3 months",
                    "Implemented CI/CD pipeline",
                    "Reduced deployment time by 60%",
                ]),
                technologies: strings(&["React", "Python", "PostgreSQL", "Docker"]),
            },
        ],
        projects: vec![
            Project {
                name: "E-Commerce Platform".to_string(),
                description: "Full-stack e-commerce solution with payment integration and \
                              inventory management"
                    .to_string(),
                technologies: strings(&["React", "Node.js", "PostgreSQL", "Stripe"]),
                github_url: Some("https://github.com/demo/ecommerce".to_string()),
                live_url: Some("https://demo-ecommerce.com".to_string()),
                image_url: None,
            },
            Project {
                name: "Task Management App".to_string(),
                description: "Collaborative task management tool with real-time updates"
                    .to_string(),
                technologies: strings(&["React", "GraphQL", "WebSockets"]),
                github_url: Some("https://github.com/demo/taskapp".to_string()),
                live_url: Some("https://demo-tasks.com".to_string()),
                image_url: None,
            },
            Project {
                name: "Analytics Dashboard".to_string(),
                description: "Real-time analytics dashboard with data visualization".to_string(),
                technologies: strings(&["React", "D3.js", "Python", "FastAPI"]),
                github_url: Some("https://github.com/demo/analytics".to_string()),
                live_url: None,
                image_url: None,
            },
        ],
        education: vec![Education {
            institution: "University of Technology".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2016-09-01".to_string(),
            end_date: Some("2020-05-31".to_string()),
            gpa: Some(3.8),
        }],
        certifications: vec![
            Certification {
                name: "AWS Certified Solutions Architect".to_string(),
                issuer: "Amazon Web Services".to_string(),
                date: "2023-03-15".to_string(),
                url: Some("https://aws.amazon.com/certification".to_string()),
            },
            Certification {
                name: "React Advanced Patterns".to_string(),
                issuer: "Frontend Masters".to_string(),
                date: "2022-11-20".to_string(),
                url: None,
            },
        ],
        social_links: vec![
            social("GitHub", "https://github.com/demo", "github"),
            social("LinkedIn", "https://linkedin.com/in/demo", "linkedin"),
            social("Twitter", "https://twitter.com/demo", "twitter"),
        ],
    }
}

pub fn mock_portfolio() -> Portfolio {
    Portfolio {
        id: "portfolio-1".to_string(),
        user_id: DEMO_USER.id.to_string(),
        amplify_app_id: Some("demo-portfolio-app".to_string()),
        domain_name: Some("demo-portfolio.example.com".to_string()),
        content: mock_portfolio_content(),
        status: PortfolioStatus::Deployed,
        created_at: "2024-01-12T10:00:00Z".to_string(),
    }
}

pub fn mock_analytics() -> PortfolioAnalytics {
    let daily = [45, 52, 38, 67, 89, 102, 95, 78, 112, 134, 156, 178, 145, 167];

    PortfolioAnalytics {
        total_views: 1247,
        unique_visitors: 892,
        avg_time_on_site: 245,
        bounce_rate: 32.5,
        top_pages: [("/", 456), ("/experience", 312), ("/projects", 289), ("/contact", 190)]
            .into_iter()
            .map(|(path, views)| PageViews {
                path: path.to_string(),
                views,
            })
            .collect(),
        views_over_time: daily
            .into_iter()
            .enumerate()
            .map(|(i, views)| DailyViews {
                date: format!("2024-01-{:02}", i + 1),
                views,
            })
            .collect(),
        referrers: [("Direct", 456), ("Google", 312), ("LinkedIn", 289), ("GitHub", 190)]
            .into_iter()
            .map(|(source, count)| ReferrerCount {
                source: source.to_string(),
                count,
            })
            .collect(),
        devices: [("Desktop", 678), ("Mobile", 412), ("Tablet", 157)]
            .into_iter()
            .map(|(device_type, count)| DeviceCount {
                device_type: device_type.to_string(),
                count,
            })
            .collect(),
    }
}

/// The fixture user re-labelled with a freshly registered name and email.
pub fn registered_user(name: &str, email: &str) -> User {
    User {
        name: name.to_string(),
        email: email.to_string(),
        ..mock_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_resumes_belong_to_demo_user() {
        let fixtures = Fixtures::default();
        assert_eq!(fixtures.resumes.len(), 3);
        assert!(fixtures.resumes.iter().all(|r| r.user_id == DEMO_USER.id));
        assert_eq!(fixtures.portfolio.user_id, fixtures.user.id);
    }

    #[test]
    fn test_views_over_time_covers_two_weeks() {
        let analytics = mock_analytics();
        assert_eq!(analytics.views_over_time.len(), 14);
        assert_eq!(analytics.views_over_time[0].date, "2024-01-01");
        assert_eq!(analytics.views_over_time[13].date, "2024-01-14");
        assert_eq!(analytics.views_over_time[13].views, 167);
    }

    #[test]
    fn test_registered_user_keeps_fixture_defaults() {
        let user = registered_user("Alice", "a@x.com");
        let base = mock_user();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.id, base.id);
        assert_eq!(user.subscription_status, base.subscription_status);
        assert_eq!(user.usage_count, base.usage_count);
    }
}
