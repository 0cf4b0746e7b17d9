use crate::api::{ChatResource, JournalPrompt, Therapist, TimeSlot};
use chrono::{Duration, Utc};

/// Catalog song with the mood group used for similarity
#[derive(Debug, Clone)]
pub struct SeedSong {
    pub title: &'static str,
    pub artist: &'static str,
    pub mood: &'static str,
    pub cover: &'static str,
    pub track_id: &'static str,
}

pub const SONGS: &[SeedSong] = &[
    SeedSong { title: "Bohemian Rhapsody", artist: "Queen", mood: "anthem", cover: "https://i.scdn.co/image/ab67616d0000b273ce4f1737bc8a646c8c4bd25a", track_id: "4u7EnebtmKWzUH433cf5Qv" },
    SeedSong { title: "Don't Stop Me Now", artist: "Queen", mood: "anthem", cover: "https://i.scdn.co/image/ab67616d0000b273008b06ec71019afd70153889", track_id: "5T8EDUDqKcs6OSOwEsfqG7" },
    SeedSong { title: "Hey Jude", artist: "The Beatles", mood: "anthem", cover: "https://i.scdn.co/image/ab67616d0000b2737a0a4b8c4a8b1c0e5e0b6e8e", track_id: "0aym2LBJBk9DAYuHHutrIl" },
    SeedSong { title: "Imagine", artist: "John Lennon", mood: "reflective", cover: "https://i.scdn.co/image/ab67616d0000b27399581550ef9746ca582bb3cc", track_id: "7pKfPomDEeI4TPT6EOYjn9" },
    SeedSong { title: "Weightless", artist: "Marconi Union", mood: "calm", cover: "https://i.scdn.co/image/ab67616d0000b273d2d1a9bd6a2a0b3e1c6b6f0e", track_id: "6kkwzB6hXLIONkEk9JciA6" },
    SeedSong { title: "Clair de Lune", artist: "Claude Debussy", mood: "calm", cover: "https://i.scdn.co/image/ab67616d0000b27393c5e3b8fdc0b0d1e0d4c1e1", track_id: "5u5aVJKjSMJr4zesMPz7bL" },
    SeedSong { title: "Gymnopédie No. 1", artist: "Erik Satie", mood: "calm", cover: "https://i.scdn.co/image/ab67616d0000b2731c2a5a3d3f0e0e5b5b9e4a8b", track_id: "5NGtFXVpXSvwunEIGeviY3" },
    SeedSong { title: "Holocene", artist: "Bon Iver", mood: "reflective", cover: "https://i.scdn.co/image/ab67616d0000b2733f2d8e3a8b3c1a6d0b0f3b7e", track_id: "4fbvXwMTXPWaFyaMWUm9CR" },
    SeedSong { title: "Fix You", artist: "Coldplay", mood: "reflective", cover: "https://i.scdn.co/image/ab67616d0000b273de09e02aa7febf30b7c02d82", track_id: "7LVHVU3tWfcxj5aiPFEW4Q" },
    SeedSong { title: "Here Comes the Sun", artist: "The Beatles", mood: "uplifting", cover: "https://i.scdn.co/image/ab67616d0000b273dc30583ba717007b00cceb25", track_id: "6dGnYIeXmHdcikdzNNDMm2" },
    SeedSong { title: "Three Little Birds", artist: "Bob Marley & The Wailers", mood: "uplifting", cover: "https://i.scdn.co/image/ab67616d0000b273b5d7ab5e8a6b3c4c7c1c2e8f", track_id: "6A9mKXlFRPMPem6ygQSt7z" },
    SeedSong { title: "Lovely Day", artist: "Bill Withers", mood: "uplifting", cover: "https://i.scdn.co/image/ab67616d0000b2739e0c1c4b3c0b6c1d7d3a4e2f", track_id: "0bRXwKfigvpKZUurwqAlEh" },
    SeedSong { title: "Breathe Me", artist: "Sia", mood: "reflective", cover: "https://i.scdn.co/image/ab67616d0000b2732f6b0b5d1f4c0d3a6c7e1b2a", track_id: "7rQXHWw5W7rTqV1J3M1Q8b" },
    SeedSong { title: "River Flows in You", artist: "Yiruma", mood: "calm", cover: "https://i.scdn.co/image/ab67616d0000b2734b0c1e6f0a2d3e5b6c7d8e9f", track_id: "2agBDIr9MYDUducQPC1sFU" },
];

/// Therapist profile without availability
pub fn therapists() -> Vec<Therapist> {
    fn profile(
        n: u64,
        name: &str,
        specializations: &[&str],
        experience_years: u32,
        education: &str,
        bio: &str,
        hourly_rate: f64,
        languages: &[&str],
    ) -> Therapist {
        Therapist {
            id: format!("{:024x}", 0x662a_0000_u64 + n),
            name: name.to_string(),
            specializations: specializations.iter().map(|s| s.to_string()).collect(),
            experience_years,
            education: education.to_string(),
            bio: bio.to_string(),
            photo_url: None,
            hourly_rate,
            languages: languages.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        profile(
            1,
            "Dr. Sarah Johnson",
            &["Anxiety", "Depression", "Stress Management"],
            12,
            "Ph.D in Clinical Psychology, Stanford University",
            "Dr. Johnson specializes in cognitive behavioral therapy and mindfulness techniques to help clients overcome anxiety and depression.",
            120.0,
            &["English", "Spanish"],
        ),
        profile(
            2,
            "Dr. Michael Chen",
            &["Trauma", "PTSD", "Family Therapy"],
            15,
            "Psy.D in Clinical Psychology, Columbia University",
            "Dr. Chen has extensive experience helping clients process trauma and rebuild their lives using evidence-based approaches.",
            135.0,
            &["English", "Mandarin"],
        ),
        profile(
            3,
            "Maya Rodriguez, LMFT",
            &["Relationships", "Couples Therapy", "Self-Esteem"],
            8,
            "M.S. in Marriage and Family Therapy, NYU",
            "Maya helps couples and individuals navigate relationship challenges and build healthier connections.",
            100.0,
            &["English", "Spanish"],
        ),
        profile(
            4,
            "Dr. James Wilson",
            &["Addiction Recovery", "Substance Abuse", "Mental Health"],
            18,
            "Ph.D in Psychology, Yale University",
            "Dr. Wilson works with clients struggling with addiction and co-occurring mental health issues to achieve lasting recovery.",
            140.0,
            &["English"],
        ),
        profile(
            5,
            "Aisha Patel, LCSW",
            &["Cultural Identity", "Grief & Loss", "Life Transitions"],
            7,
            "MSW, University of Chicago",
            "Aisha provides culturally sensitive therapy to help clients navigate life transitions and find meaning through difficult times.",
            95.0,
            &["English", "Hindi", "Gujarati"],
        ),
    ]
}

/// One-hour slots from 09:00 to 17:00 UTC for `days` days starting today
pub fn availability(days: i64) -> Vec<TimeSlot> {
    let today = Utc::now().date_naive();
    (0..days)
        .map(|offset| today + Duration::days(offset))
        .flat_map(|day| (9..17).filter_map(move |hour| day.and_hms_opt(hour, 0, 0)))
        .map(|start| {
            let start = start.and_utc();
            TimeSlot {
                start_time: start,
                end_time: start + Duration::hours(1),
                is_booked: false,
            }
        })
        .collect()
}

const PROMPTS: &[(&str, &str)] = &[
    ("gratitude", "List three things you're grateful for today and why."),
    ("gratitude", "What's something in your daily routine that you appreciate but often take for granted?"),
    ("reflection", "What was the most meaningful part of your day?"),
    ("reflection", "What's something you learned about yourself today?"),
    ("mindfulness", "Describe your surroundings right now using all five senses."),
    ("mindfulness", "What physical sensations are you aware of in your body right now?"),
    ("goals", "What's one small step you can take tomorrow toward a bigger goal?"),
    ("stress_relief", "Describe a place where you feel completely at peace. What details make it special?"),
    ("stress_relief", "List three self-care activities you could do in 5 minutes or less."),
];

pub fn prompts() -> Vec<JournalPrompt> {
    PROMPTS
        .iter()
        .map(|(category, prompt)| JournalPrompt {
            prompt: prompt.to_string(),
            category: category.to_string(),
        })
        .collect()
}

pub const CRISIS_INDICATORS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "harm myself",
    "hurt myself",
    "emergency",
    "crisis",
    "urgent help",
    "immediate danger",
];

pub fn crisis_resources() -> Vec<ChatResource> {
    vec![
        ChatResource {
            name: "Crisis Text Line".to_string(),
            kind: Some("hotline".to_string()),
            url: None,
            contact: Some("Text HOME to 741741".to_string()),
        },
        ChatResource {
            name: "National Suicide Prevention Lifeline".to_string(),
            kind: Some("hotline".to_string()),
            url: None,
            contact: Some("988 or 1-800-273-8255".to_string()),
        },
    ]
}

/// Topic keyword, then (name, kind, url) resources for it
pub const TOPIC_RESOURCES: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "anxi",
        &[
            ("Anxiety Coping Tools", "article", "https://www.calmverse.com/resources/anxiety-tools"),
            ("Breathing Exercises", "guided_meditation", "https://www.calmverse.com/meditations/breathing"),
        ],
    ),
    (
        "depress",
        &[
            ("Understanding Depression", "article", "https://www.calmverse.com/resources/depression-guide"),
            ("Uplifting Meditation", "guided_meditation", "https://www.calmverse.com/meditations/uplift"),
        ],
    ),
    (
        "stress",
        &[
            ("Stress Management", "article", "https://www.calmverse.com/resources/stress-management"),
            ("Progressive Relaxation", "guided_meditation", "https://www.calmverse.com/meditations/relax"),
        ],
    ),
    (
        "sleep",
        &[
            ("Sleep Hygiene Tips", "article", "https://www.calmverse.com/resources/sleep-better"),
            ("Bedtime Meditation", "guided_meditation", "https://www.calmverse.com/meditations/sleep"),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_covers_working_hours() {
        let slots = availability(2);
        assert_eq!(slots.len(), 16);
        assert!(slots.windows(2).all(|w| w[0].start_time < w[1].start_time));
        assert!(slots.iter().all(|s| !s.is_booked));
    }

    #[test]
    fn test_therapist_ids_are_unique() {
        let list = therapists();
        let mut ids: Vec<_> = list.iter().map(|t| t.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), list.len());
        assert!(list.iter().all(|t| t.id.len() == 24));
    }
}
