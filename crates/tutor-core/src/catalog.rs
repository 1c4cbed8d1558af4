//! Static option lists offered to clients.

pub static SUBJECTS: &[&str] = &[
    "Mathematics",
    "Science",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "History",
    "Geography",
    "Literature",
    "Economics",
    "Psychology",
    "Philosophy",
    "Art",
    "Music",
    "Language Learning",
    "Other",
];

pub static LEVELS: &[&str] = &["Beginner", "Elementary", "Intermediate", "Advanced", "Expert"];

pub static LEARNING_STYLES: &[&str] = &[
    "Visual (diagrams, charts, images)",
    "Auditory (verbal explanations)",
    "Kinesthetic (hands-on, practical)",
    "Reading/Writing (text-based)",
    "Logical (step-by-step reasoning)",
    "Social (group discussions)",
    "Solitary (self-study)",
];

pub static LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Chinese",
    "Japanese",
    "Korean",
    "Arabic",
    "Hindi",
    "Russian",
    "Other",
];
