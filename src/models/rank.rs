/// The 10-rank progression ladder. Ranks are permanent — never lost.
#[derive(Debug, Clone, PartialEq)]
pub struct Rank {
    pub level: u8,
    pub title: &'static str,
    pub points_required: u64,
    pub icon: &'static str,
    pub theme: &'static str,
    pub colour: &'static str,
    pub perk: &'static str,
}

pub static RANKS: &[Rank] = &[
    Rank {
        level: 1,
        title: "Raw Iron",
        points_required: 0,
        icon: "⚙",
        theme: "gray",
        colour: "#94a3b8",
        perk: "Welcome to FitForge. Your journey begins.",
    },
    Rank {
        level: 2,
        title: "Apprentice",
        points_required: 500,
        icon: "🔩",
        theme: "bronze",
        colour: "#cd7f32",
        perk: "Streak tracker and streak badges unlocked.",
    },
    Rank {
        level: 3,
        title: "Journeyman",
        points_required: 1500,
        icon: "🔧",
        theme: "bronze+",
        colour: "#b87333",
        perk: "PR history view unlocked.",
    },
    Rank {
        level: 4,
        title: "Craftsman",
        points_required: 3500,
        icon: "🛠",
        theme: "silver",
        colour: "#c0c0c0",
        perk: "Silver theme unlocked.",
    },
    Rank {
        level: 5,
        title: "Forgemaster",
        points_required: 7500,
        icon: "⚒",
        theme: "silver+",
        colour: "#a8a9ad",
        perk: "Workout tip of the week unlocked.",
    },
    Rank {
        level: 6,
        title: "Tempered",
        points_required: 15000,
        icon: "🥇",
        theme: "gold",
        colour: "#ffd700",
        perk: "Gold theme and animated profile badge unlocked.",
    },
    Rank {
        level: 7,
        title: "Hardened",
        points_required: 27500,
        icon: "💎",
        theme: "gold+",
        colour: "#ffb700",
        perk: "Advanced volume analytics unlocked.",
    },
    Rank {
        level: 8,
        title: "Steelborn",
        points_required: 45000,
        icon: "🔱",
        theme: "steel",
        colour: "#4a90d9",
        perk: "Historical plan comparison unlocked.",
    },
    Rank {
        level: 9,
        title: "Iron Legend",
        points_required: 70000,
        icon: "🌋",
        theme: "ember",
        colour: "#ff4500",
        perk: "Exclusive ember theme unlocked.",
    },
    Rank {
        level: 10,
        title: "The Forge Master",
        points_required: 100000,
        icon: "👑",
        theme: "obsidian",
        colour: "#1a1a2e",
        perk: "Prestige rank. Obsidian theme. Permanent profile badge.",
    },
];

/// Highest rank whose threshold is met by the given points total.
pub fn rank_for_points(total_points: u64) -> &'static Rank {
    let mut rank = &RANKS[0];
    for r in RANKS {
        if total_points >= r.points_required {
            rank = r;
        } else {
            break;
        }
    }
    rank
}

/// The rank after the given level, or None at the top of the ladder.
pub fn next_rank(current_level: u8) -> Option<&'static Rank> {
    RANKS.iter().find(|r| r.level == current_level + 1)
}

/// Progress percentage (0–100) towards the next rank.
pub fn rank_progress(total_points: u64) -> u32 {
    let current = rank_for_points(total_points);
    let Some(next) = next_rank(current.level) else {
        return 100;
    };
    let range = next.points_required - current.points_required;
    let progress = total_points - current.points_required;
    (((progress as f64 / range as f64) * 100.0).round() as u32).min(100)
}
