//! Static data the dashboard shows when no AI result is available.

use crate::dashboard::merge::JobListing;
use crate::insights::models::JobSummary;
use crate::insights::skill_gaps::{Course, Priority, SkillGap};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    company: &str,
    logo: &str,
    location: &str,
    job_type: &str,
    salary: &str,
    match_score: u8,
    skills: &[&str],
    posted_time: &str,
    is_new: bool,
) -> JobListing {
    JobListing {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        logo: logo.to_string(),
        location: location.to_string(),
        job_type: job_type.to_string(),
        salary: salary.to_string(),
        match_score,
        skills: strings(skills),
        posted_time: posted_time.to_string(),
        is_new,
        ai_reasons: Vec::new(),
        is_ai_recommended: false,
    }
}

fn course(title: &str, provider: &str, rating: f32, duration: &str, price: &str) -> Course {
    Course {
        title: title.to_string(),
        provider: provider.to_string(),
        rating,
        duration: duration.to_string(),
        price: price.to_string(),
    }
}

pub fn recommended_jobs() -> Vec<JobListing> {
    vec![
        listing(
            "1",
            "Frontend Developer Intern",
            "TechCorp Solutions",
            "https://images.unsplash.com/photo-1560472354-b33ff0c44a43?w=100&h=100&fit=crop&crop=center",
            "San Francisco, CA",
            "Internship",
            "$3,000/month",
            95,
            &["React", "JavaScript", "CSS"],
            "2 hours ago",
            true,
        ),
        listing(
            "2",
            "Software Engineer - Entry Level",
            "InnovateLabs",
            "https://images.pexels.com/photos/3184291/pexels-photo-3184291.jpeg?w=100&h=100&fit=crop&crop=center",
            "Remote",
            "Full-time",
            "$75,000/year",
            88,
            &["Python", "Django", "PostgreSQL"],
            "5 hours ago",
            true,
        ),
        listing(
            "3",
            "UI/UX Designer Intern",
            "DesignStudio Pro",
            "https://images.pixabay.com/photo/2016/12/27/13/10/logo-1933884_1280.png?w=100&h=100&fit=crop&crop=center",
            "New York, NY",
            "Internship",
            "$2,800/month",
            82,
            &["Figma", "Adobe XD", "Prototyping"],
            "1 day ago",
            false,
        ),
        listing(
            "4",
            "Data Analyst Trainee",
            "DataInsights Inc",
            "https://images.unsplash.com/photo-1572021335469-31706a17aaef?w=100&h=100&fit=crop&crop=center",
            "Austin, TX",
            "Full-time",
            "$65,000/year",
            79,
            &["SQL", "Python", "Tableau"],
            "2 days ago",
            false,
        ),
        listing(
            "5",
            "Mobile App Developer",
            "AppCrafters",
            "https://images.pexels.com/photos/3184338/pexels-photo-3184338.jpeg?w=100&h=100&fit=crop&crop=center",
            "Seattle, WA",
            "Contract",
            "$4,500/month",
            85,
            &["React Native", "Flutter", "Firebase"],
            "3 days ago",
            false,
        ),
    ]
}

pub fn skill_gaps() -> Vec<SkillGap> {
    vec![
        SkillGap {
            id: "1".to_string(),
            skill: "React Native".to_string(),
            priority: Priority::High,
            demand_score: 85,
            current_level: 0,
            target_level: 70,
            jobs_requiring: 23,
            average_salary_increase: "$8,000".to_string(),
            time_to_learn: "3-4 months".to_string(),
            description: "Mobile app development framework highly sought after by employers in your target job market.".to_string(),
            recommended_courses: vec![
                course("React Native - The Practical Guide", "Udemy", 4.6, "32 hours", "$89.99"),
                course("React Native Development", "Coursera", 4.5, "6 weeks", "Free"),
            ],
        },
        SkillGap {
            id: "2".to_string(),
            skill: "TypeScript".to_string(),
            priority: Priority::High,
            demand_score: 78,
            current_level: 20,
            target_level: 75,
            jobs_requiring: 31,
            average_salary_increase: "$6,500".to_string(),
            time_to_learn: "2-3 months".to_string(),
            description: "Strongly typed programming language that builds on JavaScript, giving you better tooling at any scale.".to_string(),
            recommended_courses: vec![
                course("Understanding TypeScript", "Udemy", 4.7, "15 hours", "$79.99"),
                course("TypeScript Fundamentals", "Pluralsight", 4.4, "4 hours", "$29/month"),
            ],
        },
        SkillGap {
            id: "3".to_string(),
            skill: "Node.js".to_string(),
            priority: Priority::Medium,
            demand_score: 72,
            current_level: 35,
            target_level: 80,
            jobs_requiring: 18,
            average_salary_increase: "$5,200".to_string(),
            time_to_learn: "2-3 months".to_string(),
            description: "JavaScript runtime built on Chrome's V8 JavaScript engine for building scalable network applications.".to_string(),
            recommended_courses: vec![course(
                "The Complete Node.js Developer Course",
                "Udemy",
                4.6,
                "35 hours",
                "$94.99",
            )],
        },
    ]
}

/// Jobs offered in the interview-preparation picker.
pub fn interview_jobs() -> Vec<JobSummary> {
    vec![
        JobSummary {
            id: "1".to_string(),
            title: "Frontend Developer".to_string(),
            company: "TechCorp".to_string(),
            skills: strings(&["React", "JavaScript", "CSS"]),
        },
        JobSummary {
            id: "2".to_string(),
            title: "Backend Developer".to_string(),
            company: "DataSoft".to_string(),
            skills: strings(&["Node.js", "Python", "SQL"]),
        },
        JobSummary {
            id: "3".to_string(),
            title: "Full Stack Developer".to_string(),
            company: "StartupXYZ".to_string(),
            skills: strings(&["React", "Node.js", "MongoDB"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_sets_have_expected_sizes() {
        assert_eq!(recommended_jobs().len(), 5);
        assert_eq!(skill_gaps().len(), 3);
        assert_eq!(interview_jobs().len(), 3);
    }

    #[test]
    fn test_fallback_ids_are_unique() {
        let jobs = recommended_jobs();
        let ids: HashSet<_> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids.len(), jobs.len());
        assert!(jobs.iter().all(|j| !j.is_ai_recommended));
    }

    #[test]
    fn test_fallback_gap_levels_are_ordered() {
        for gap in skill_gaps() {
            assert!(gap.target_level >= gap.current_level, "{}", gap.skill);
            assert!(!gap.recommended_courses.is_empty());
        }
    }
}
