use rand::seq::SliceRandom;
use rand::Rng;

use crate::scoring::MissGrade;

/// Shown after a correct answer.
pub const SUCCESS: [&str; 15] = [
    "Acertou! :D",
    "Parabéns! :P",
    "Excelente! :]",
    "Correto! ☆",
    "Perfeito! :)",
    "Acertou em cheio!",
    "Magnífico! O_O",
    "Sem erros por aqui!",
    "Cravou ;)",
    "Impressionante!",
    "Mandou bem!",
    "Que precisão! 10/10",
    "Arrasou!",
    "Resposta exata!",
    "Brilhante! ☆",
];

pub const MISS_NEAR: [&str; 2] = ["Errado! Foi por pouco... :(", "Quase lá! Tente de novo."];
pub const MISS_MEDIUM: [&str; 2] = [
    "Errado! Esta no caminho certo.",
    "Não foi dessa vez, mais uma!",
];
pub const MISS_FAR: [&str; 2] = ["Errado! Um pouco longe...:L", "Hmm, a resposta e outra."];

pub const PARSE_FAILURE: &str = "Digite apenas números!";

pub fn miss_pool(grade: MissGrade) -> &'static [&'static str] {
    match grade {
        MissGrade::Near => &MISS_NEAR,
        MissGrade::Medium => &MISS_MEDIUM,
        MissGrade::Far => &MISS_FAR,
    }
}

/// Milestone banner for the big streak bonuses. The small bonuses (+10/+5)
/// are appended to the regular success message instead.
pub fn milestone_banner(bonus: u32) -> Option<String> {
    match bonus {
        100 => Some(" ☆ LEGENDÁRIO! +100 PONTOS!  ☆".to_string()),
        50 => Some(" ☆ INCRÍVEL! +50 PONTOS!  ☆".to_string()),
        25 => Some(" ☆ ESPETACULAR! +25 PONTOS!  ☆".to_string()),
        _ => None,
    }
}

/// Picks a message from `pool`, distinct from `previous` whenever the pool
/// has more than one entry.
pub fn choose_distinct<R: Rng>(rng: &mut R, pool: &[&'static str], previous: &str) -> &'static str {
    let mut picked = *pool.choose(rng).unwrap_or(&"");
    while pool.len() > 1 && picked == previous {
        picked = *pool.choose(rng).unwrap_or(&"");
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_choose_distinct_never_repeats_previous() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut previous = "";
        for _ in 0..300 {
            let next = choose_distinct(&mut rng, &SUCCESS, previous);
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_choose_distinct_single_entry_pool() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = ["só essa"];
        assert_eq!(choose_distinct(&mut rng, &pool, "só essa"), "só essa");
    }

    #[test]
    fn test_choose_distinct_two_entry_pool_alternates() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut previous = MISS_NEAR[0];
        for _ in 0..50 {
            let next = choose_distinct(&mut rng, &MISS_NEAR, previous);
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_miss_pools_by_grade() {
        assert_eq!(miss_pool(MissGrade::Near), &MISS_NEAR);
        assert_eq!(miss_pool(MissGrade::Medium), &MISS_MEDIUM);
        assert_eq!(miss_pool(MissGrade::Far), &MISS_FAR);
    }

    #[test]
    fn test_milestone_banners() {
        assert!(milestone_banner(100).unwrap().contains("+100 PONTOS"));
        assert!(milestone_banner(50).unwrap().contains("+50 PONTOS"));
        assert!(milestone_banner(25).unwrap().contains("+25 PONTOS"));
        assert_eq!(milestone_banner(10), None);
        assert_eq!(milestone_banner(5), None);
        assert_eq!(milestone_banner(0), None);
    }
}
