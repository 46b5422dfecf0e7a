use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{all_ranks, all_suits, Card, Rank};
use crate::errors::GameError;

/// Hand categories in standard poker order; the discriminant is the category number.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two pairs",
            Category::ThreeOfAKind => "Three of a kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full house",
            Category::FourOfAKind => "Four of a kind",
            Category::StraightFlush => "Straight flush",
            Category::RoyalFlush => "Royal flush",
        }
    }
}

/// A ranked hand.
///
/// Every category has a fixed shape, so two combinations of the same
/// category always carry the same fields:
///
/// | category | primary | kicker | chain |
/// |---|---|---|---|
/// | High card | best single | - | next four singles |
/// | Pair | pair | - | three best singles |
/// | Two pairs | high pair, low pair | best single | - |
/// | Three of a kind | trips | - | two best singles |
/// | Straight | top card | - | - |
/// | Flush | top card | - | whole suit subset (5 to 7), descending |
/// | Full house | trips, pair | - | - |
/// | Four of a kind | quad | best single | - |
/// | Straight / royal flush | top card | - | - |
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub category: Category,
    pub primary: Vec<Rank>,
    pub kicker: Option<Rank>,
    pub chain: Vec<Rank>,
}

impl Combination {
    fn new(category: Category, primary: Vec<Rank>, kicker: Option<Rank>, chain: Vec<Rank>) -> Self {
        Self {
            category,
            primary,
            kicker,
            chain,
        }
    }

    /// Ranks compared after the category: primary, then kicker, then chain.
    pub fn tiebreak(&self) -> impl Iterator<Item = Rank> + '_ {
        self.primary
            .iter()
            .copied()
            .chain(self.kicker)
            .chain(self.chain.iter().copied())
    }
}

impl Ord for Combination {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialOrd for Combination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary: Vec<String> = self.primary.iter().map(|r| format!("\"{}\"", r)).collect();
        write!(f, "{} with {}", self.category.name(), primary.join(" and "))?;
        if let Some(k) = self.kicker {
            write!(f, " and kicker \"{}\"", k)?;
        }
        if !self.chain.is_empty() {
            let chain: Vec<String> = self.chain.iter().map(|r| format!("\"{}\"", r)).collect();
            write!(f, " and kickers {}", chain.join(" "))?;
        }
        Ok(())
    }
}

/// Rank buckets keyed by multiplicity, each sorted high to low.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Repetitions {
    pub quads: Vec<Rank>,
    pub trips: Vec<Rank>,
    pub pairs: Vec<Rank>,
    pub singles: Vec<Rank>,
}

/// Returns every card of the suit that reaches five, ascending, or `None`.
/// The subset is not truncated to five cards.
pub fn detect_flush(cards: &[Card]) -> Option<Vec<Card>> {
    all_suits().into_iter().find_map(|suit| {
        let mut suited: Vec<Card> = cards.iter().filter(|c| c.suit == suit).copied().collect();
        if suited.len() >= 5 {
            suited.sort();
            Some(suited)
        } else {
            None
        }
    })
}

/// Returns the top card of every five-rank run, lowest run first.
///
/// An ace also counts as rank 1 so the wheel (A-2-3-4-5) is found with a
/// top card of five. Overlapping runs each report their own top.
pub fn detect_straight(cards: &[Card]) -> Option<Vec<Rank>> {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    if values.contains(&Rank::Ace.value()) {
        values.push(1);
    }
    values.sort_unstable();
    values.dedup();

    let tops: Vec<Rank> = values
        .windows(5)
        .filter(|w| w[4] - w[0] == 4)
        .filter_map(|w| Rank::try_from(w[4]).ok())
        .collect();
    if tops.is_empty() {
        None
    } else {
        Some(tops)
    }
}

/// Buckets ranks by how often they occur.
///
/// Only one grouping of each size can score, so surplus groups are demoted:
/// a quad sends every trips and pair rank to the singles, a lower trips rank
/// becomes a single, and pairs beyond the top two become singles.
pub fn detect_repetitions(cards: &[Card]) -> Repetitions {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }

    let mut reps = Repetitions::default();
    for rank in all_ranks().into_iter().rev() {
        match counts[rank.value() as usize] {
            0 => {}
            1 => reps.singles.push(rank),
            2 => reps.pairs.push(rank),
            3 => reps.trips.push(rank),
            _ => reps.quads.push(rank),
        }
    }

    if !reps.quads.is_empty() {
        reps.singles.append(&mut reps.trips);
        reps.singles.append(&mut reps.pairs);
    }
    if reps.trips.len() > 1 {
        let mut lower = reps.trips.split_off(1);
        reps.singles.append(&mut lower);
    }
    if reps.pairs.len() > 2 {
        reps.pairs.sort_unstable_by(|a, b| b.cmp(a));
        let mut rest = reps.pairs.split_off(2);
        reps.singles.append(&mut rest);
    }

    for bucket in [
        &mut reps.quads,
        &mut reps.trips,
        &mut reps.pairs,
        &mut reps.singles,
    ] {
        bucket.sort_unstable_by(|a, b| b.cmp(a));
    }
    reps
}

/// Ranks a seven-card hand (two hole cards plus the full board).
pub fn classify(cards: &[Card; 7]) -> Combination {
    combination_of(cards)
}

/// Ranks five to seven cards. Bots use this before the river.
pub fn evaluate(cards: &[Card]) -> Result<Combination, GameError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(GameError::InvalidHandSize { count: cards.len() });
    }
    Ok(combination_of(cards))
}

/// Total order over combinations: category, then the tiebreak ranks
/// lexicographically. Suits never take part.
pub fn compare(a: &Combination, b: &Combination) -> Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.tiebreak().cmp(b.tiebreak()))
}

/// Keys whose combination is not beaten by any other entry.
pub fn find_best_among<'c, K, I>(entries: I) -> Vec<K>
where
    K: Copy,
    I: IntoIterator<Item = (K, &'c Combination)>,
{
    let entries: Vec<(K, &Combination)> = entries.into_iter().collect();
    let Some(best) = entries.iter().map(|(_, c)| *c).max_by(|a, b| compare(a, b)) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|(_, c)| compare(c, best) == Ordering::Equal)
        .map(|(k, _)| *k)
        .collect()
}

fn combination_of(cards: &[Card]) -> Combination {
    let mut sorted = cards.to_vec();
    sorted.sort();

    if let Some(flush) = detect_flush(&sorted) {
        if let Some(top) = detect_straight(&flush).and_then(|tops| tops.into_iter().max()) {
            let category = if top == Rank::Ace {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return Combination::new(category, vec![top], None, Vec::new());
        }
        let chain: Vec<Rank> = flush.iter().rev().map(|c| c.rank).collect();
        let top: Vec<Rank> = chain.iter().take(1).copied().collect();
        return Combination::new(Category::Flush, top, None, chain);
    }

    if let Some(top) = detect_straight(&sorted).and_then(|tops| tops.into_iter().max()) {
        return Combination::new(Category::Straight, vec![top], None, Vec::new());
    }

    let reps = detect_repetitions(&sorted);
    let best_singles = |n: usize| -> Vec<Rank> { reps.singles.iter().take(n).copied().collect() };

    if let Some(&quad) = reps.quads.first() {
        return Combination::new(
            Category::FourOfAKind,
            vec![quad],
            reps.singles.first().copied(),
            Vec::new(),
        );
    }

    match (reps.trips.first(), reps.pairs.as_slice()) {
        (Some(&trips), [pair, ..]) => {
            Combination::new(Category::FullHouse, vec![trips, *pair], None, Vec::new())
        }
        (Some(&trips), []) => {
            Combination::new(Category::ThreeOfAKind, vec![trips], None, best_singles(2))
        }
        (None, [high, low, ..]) => Combination::new(
            Category::TwoPair,
            vec![*high, *low],
            reps.singles.first().copied(),
            Vec::new(),
        ),
        (None, [pair]) => Combination::new(Category::OnePair, vec![*pair], None, best_singles(3)),
        (None, []) => Combination::new(
            Category::HighCard,
            best_singles(1),
            None,
            reps.singles.iter().skip(1).take(4).copied().collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(text: &str) -> Vec<Card> {
        parse_cards(text).unwrap()
    }

    #[test]
    fn flush_keeps_whole_suit_subset() {
        let flush = detect_flush(&cards("2h 9h Jh 4h Kh 6h 3c")).unwrap();
        assert_eq!(flush.len(), 6);
        assert!(flush.windows(2).all(|w| w[0].rank <= w[1].rank));
        assert!(detect_flush(&cards("2h 9h Jh 4h Kc 6c 3c")).is_none());
    }

    #[test]
    fn straight_reports_every_run_top() {
        let tops = detect_straight(&cards("5c 6d 7h 8s 9c Td 2h")).unwrap();
        assert_eq!(tops, vec![Rank::Nine, Rank::Ten]);
    }

    #[test]
    fn wheel_uses_ace_low() {
        let tops = detect_straight(&cards("Ac 2d 3h 4s 5c 9d Jh")).unwrap();
        assert_eq!(tops, vec![Rank::Five]);
    }

    #[test]
    fn paired_card_does_not_hide_straight() {
        let tops = detect_straight(&cards("5c 6d 6h 7s 8c 9d 2h")).unwrap();
        assert_eq!(tops, vec![Rank::Nine]);
    }

    #[test]
    fn quad_demotes_other_groups() {
        let reps = detect_repetitions(&cards("9c 9d 9h 9s Kc Kd 2h"));
        assert_eq!(reps.quads, vec![Rank::Nine]);
        assert!(reps.pairs.is_empty());
        assert_eq!(reps.singles, vec![Rank::King, Rank::Two]);
    }

    #[test]
    fn third_pair_is_demoted_to_singles() {
        let reps = detect_repetitions(&cards("2c 2d 8h 8s Qc Qd 5h"));
        assert_eq!(reps.pairs, vec![Rank::Queen, Rank::Eight]);
        assert_eq!(reps.singles, vec![Rank::Five, Rank::Two]);
    }

    #[test]
    fn second_trips_becomes_singles() {
        let reps = detect_repetitions(&cards("Ac Ad Ah Kc Kd Ks 2h"));
        assert_eq!(reps.trips, vec![Rank::Ace]);
        assert!(reps.pairs.is_empty());
        assert_eq!(reps.singles, vec![Rank::King, Rank::Two]);
        let combo = evaluate(&cards("Ac Ad Ah Kc Kd Ks 2h")).unwrap();
        assert_eq!(combo.category, Category::ThreeOfAKind);
        assert_eq!(combo.primary, vec![Rank::Ace]);
        assert_eq!(combo.chain, vec![Rank::King, Rank::Two]);
    }

    #[test]
    fn evaluate_rejects_wrong_sizes() {
        assert_eq!(
            evaluate(&cards("Ac Kd")),
            Err(GameError::InvalidHandSize { count: 2 })
        );
        assert!(evaluate(&cards("Ac Kd Qh Js 9c")).is_ok());
    }

    #[test]
    fn display_names_category_and_ranks() {
        let combo = evaluate(&cards("Ac Ad Kh Ks 9c 4d 2h")).unwrap();
        assert_eq!(
            combo.to_string(),
            "Two pairs with \"A\" and \"K\" and kicker \"9\""
        );
    }
}
