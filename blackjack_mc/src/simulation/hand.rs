/// Cards held by one party, in the order they were dealt. Cards are given in
/// blackjack values (i.e., 1 stands for A. 10 stands for 10 and J, Q, K).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<u8>,
}

impl Hand {
    pub fn new(first: u8, second: u8) -> Hand {
        let mut cards = Vec::with_capacity(4);
        cards.push(first);
        cards.push(second);
        Hand { cards }
    }

    /// The hand receives a given card.
    pub fn add(&mut self, card: u8) {
        self.cards.push(card);
    }

    /// The first card dealt, which is the face-up one for the dealer.
    pub fn up_card(&self) -> u8 {
        self.cards[0]
    }

    /// Best total not exceeding 21 if there is one, otherwise the total with every
    /// ace counted as 1.
    pub fn total(&self) -> u16 {
        self.evaluate().0
    }

    /// True iff an ace is counted as 11 in `total`.
    pub fn has_usable_ace(&self) -> bool {
        self.evaluate().1
    }

    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    // At most one ace can ever count as 11: two of them already make 22.
    fn evaluate(&self) -> (u16, bool) {
        let mut hard_sum: u16 = 0;
        let mut aces = 0;
        for &card in &self.cards {
            if card == 1 {
                aces += 1;
            }
            hard_sum += card as u16;
        }

        if aces > 0 && hard_sum + 10 <= 21 {
            (hard_sum + 10, true)
        } else {
            (hard_sum, false)
        }
    }
}
