//! Built-in exercise library: name → required equipment.
//!
//! The engine only needs the equipment lists (for the bodyweight-only
//! session check); technique descriptions and media stay out of the binary.

pub static EXERCISES: &[(&str, &[&str])] = &[
    // Barbell
    ("Barbell Back Squat", &["Barbell", "Power Rack"]),
    ("Barbell Front Squat", &["Barbell", "Power Rack"]),
    ("Barbell Deadlift", &["Barbell"]),
    ("Romanian Deadlift", &["Barbell"]),
    ("Barbell Bench Press", &["Barbell", "Bench"]),
    ("Barbell Incline Bench Press", &["Barbell", "Incline Bench"]),
    ("Barbell Overhead Press", &["Barbell"]),
    ("Barbell Bent-Over Row", &["Barbell"]),
    ("Barbell Hip Thrust", &["Barbell", "Bench"]),
    ("Barbell Curl", &["Barbell"]),
    ("Barbell Skull Crusher", &["Barbell", "Bench"]),
    ("Barbell Sumo Deadlift", &["Barbell"]),
    ("Barbell Good Morning", &["Barbell"]),
    ("Barbell Shrug", &["Barbell"]),
    ("Barbell Lunge", &["Barbell"]),
    // Dumbbell
    ("Dumbbell Bench Press", &["Dumbbells", "Bench"]),
    ("Dumbbell Incline Press", &["Dumbbells", "Incline Bench"]),
    ("Dumbbell Fly", &["Dumbbells", "Bench"]),
    ("Dumbbell Shoulder Press", &["Dumbbells"]),
    ("Dumbbell Lateral Raise", &["Dumbbells"]),
    ("Dumbbell Front Raise", &["Dumbbells"]),
    ("Dumbbell Bent-Over Row", &["Dumbbells"]),
    ("Dumbbell Renegade Row", &["Dumbbells"]),
    ("Dumbbell Romanian Deadlift", &["Dumbbells"]),
    ("Dumbbell Goblet Squat", &["Dumbbells"]),
    ("Dumbbell Lunge", &["Dumbbells"]),
    ("Dumbbell Step-Up", &["Dumbbells", "Box"]),
    ("Dumbbell Curl", &["Dumbbells"]),
    ("Dumbbell Hammer Curl", &["Dumbbells"]),
    ("Dumbbell Concentration Curl", &["Dumbbells", "Bench"]),
    ("Dumbbell Overhead Tricep Extension", &["Dumbbells"]),
    ("Dumbbell Kickback", &["Dumbbells"]),
    ("Dumbbell Chest-Supported Row", &["Dumbbells", "Incline Bench"]),
    ("Dumbbell Arnold Press", &["Dumbbells"]),
    ("Dumbbell Pullover", &["Dumbbells", "Bench"]),
    // Cable
    ("Cable Chest Fly", &["Cable Machine"]),
    ("Cable Crossover", &["Cable Machine"]),
    ("Cable Row (Seated)", &["Cable Machine", "Rowing Attachment"]),
    ("Cable Lat Pulldown", &["Cable Machine", "Lat Bar"]),
    ("Cable Face Pull", &["Cable Machine", "Rope Attachment"]),
    ("Cable Tricep Pushdown", &["Cable Machine", "Bar Attachment"]),
    ("Cable Overhead Tricep Extension", &["Cable Machine", "Rope Attachment"]),
    ("Cable Curl", &["Cable Machine", "Bar Attachment"]),
    ("Cable Hammer Curl", &["Cable Machine", "Rope Attachment"]),
    ("Cable Lateral Raise", &["Cable Machine"]),
    ("Cable Front Raise", &["Cable Machine"]),
    ("Cable Pull-Through", &["Cable Machine", "Rope Attachment"]),
    ("Cable Hip Abduction", &["Cable Machine", "Ankle Attachment"]),
    ("Cable Crunch", &["Cable Machine", "Rope Attachment"]),
    ("Cable Woodchop", &["Cable Machine"]),
    ("Cable Reverse Fly", &["Cable Machine"]),
    ("Cable Upright Row", &["Cable Machine", "Bar Attachment"]),
    ("Cable Shrug", &["Cable Machine", "Bar Attachment"]),
    ("Cable Romanian Deadlift", &["Cable Machine"]),
    ("Cable Kickback", &["Cable Machine", "Ankle Attachment"]),
    // Machines
    ("Leg Press", &["Leg Press Machine"]),
    ("Leg Extension", &["Leg Extension Machine"]),
    ("Leg Curl (Seated)", &["Seated Leg Curl Machine"]),
    ("Leg Curl (Lying)", &["Lying Leg Curl Machine"]),
    ("Chest Press Machine", &["Chest Press Machine"]),
    ("Pec Deck / Machine Fly", &["Pec Deck Machine"]),
    ("Lat Pulldown Machine", &["Lat Pulldown Machine"]),
    ("Seated Row Machine", &["Seated Row Machine"]),
    ("Shoulder Press Machine", &["Shoulder Press Machine"]),
    ("Smith Machine Squat", &["Smith Machine"]),
    ("Smith Machine Bench Press", &["Smith Machine", "Bench"]),
    ("Hip Abductor Machine", &["Hip Abductor Machine"]),
    ("Hip Adductor Machine", &["Hip Adductor Machine"]),
    ("Calf Raise Machine", &["Calf Raise Machine"]),
    ("Back Extension Machine", &["Back Extension Machine"]),
    // Bodyweight & bars
    ("Pull-Up", &["Pull-Up Bar"]),
    ("Chin-Up", &["Pull-Up Bar"]),
    ("Push-Up", &["Bodyweight"]),
    ("Dip", &["Dip Bars"]),
    ("Bodyweight Squat", &["Bodyweight"]),
    ("Bulgarian Split Squat", &["Bench"]),
    ("Glute Bridge", &["Bodyweight"]),
    ("Plank", &["Bodyweight"]),
    ("Side Plank", &["Bodyweight"]),
    ("Mountain Climber", &["Bodyweight"]),
    ("Burpee", &["Bodyweight"]),
    ("Hanging Knee Raise", &["Pull-Up Bar"]),
    ("Hanging Leg Raise", &["Pull-Up Bar"]),
    ("Inverted Row", &["Barbell", "Rack"]),
    ("Box Jump", &["Box", "Bodyweight"]),
];

/// Case-insensitive exact-name lookup.
pub fn equipment_for(name: &str) -> Option<&'static [&'static str]> {
    EXERCISES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, eq)| *eq)
}

/// True when the exercise needs no equipment beyond bodyweight.
/// Unknown exercises are not treated as bodyweight.
pub fn is_bodyweight(name: &str) -> bool {
    match equipment_for(name) {
        Some(equipment) => equipment.is_empty() || equipment.contains(&"Bodyweight"),
        None => false,
    }
}
