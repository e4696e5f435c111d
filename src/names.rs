pub const FLASHCARDS_URL: &str = "/flashcards";
pub const CATEGORIES_URL: &str = "/categories";
pub const QUIZZES_URL: &str = "/quizzes";
pub const SUBMIT_QUIZ_URL: &str = "/submit-quiz";
pub const MARATHON_URL: &str = "/marathon";
pub const STATS_URL: &str = "/stats";
pub const REGISTER_URL: &str = "/register";
pub const LOGIN_URL: &str = "/login";

// Quiz generation defaults
pub const MAX_QUIZ_CATEGORIES: usize = 4;
pub const MIN_QUIZ_POOL: usize = 4;

// Study time-of-day buckets: Night runs 00-08, Morning 08-16, Evening 16-24
pub const MORNING_START_HOUR: u32 = 8;
pub const EVENING_START_HOUR: u32 = 16;
