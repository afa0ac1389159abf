/// Streak milestone bonus. Buckets are mutually exclusive, largest first:
/// a streak of 100 pays 100, not 100+50+25+10+5.
pub fn bonus_for_streak(streak: u32) -> u32 {
    if streak == 0 {
        0
    } else if streak % 100 == 0 {
        100
    } else if streak % 50 == 0 {
        50
    } else if streak % 25 == 0 {
        25
    } else if streak % 10 == 0 {
        10
    } else if streak % 5 == 0 {
        5
    } else {
        0
    }
}

/// How far off a wrong answer was. A distance of 0 means the answer was
/// correct and never reaches grading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissGrade {
    Near,
    Medium,
    Far,
}

impl MissGrade {
    pub fn classify(answer: i64, correct: i64) -> Self {
        let diff = (answer - correct).abs();
        if diff <= 2 {
            MissGrade::Near
        } else if diff <= 5 {
            MissGrade::Medium
        } else {
            MissGrade::Far
        }
    }
}
