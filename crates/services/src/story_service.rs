use mathcat_core::ops::OperationKind;

/// Handoff payload for the narrative collaborator: the current question's
/// operands and operator, without the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryRequest {
    pub kind: OperationKind,
    pub operands: (i64, i64),
    pub symbol: &'static str,
}

/// Produces the narrative text for a story detour.
pub trait Narrator: Send + Sync {
    fn tell(&self, request: &StoryRequest) -> String;
}

/// Mati the cat's built-in storyteller.
///
/// Deterministic, offline templates per operation; the numbers of the
/// current question are woven into a short scene so the learner hears the
/// exercise retold rather than solved for them.
pub struct StoryTeller;

impl Narrator for StoryTeller {
    fn tell(&self, request: &StoryRequest) -> String {
        let (a, b) = request.operands;
        match request.kind {
            OperationKind::Addition => format!(
                "Mati the cat found {a} shiny pebbles by the river.\n\
                 On the way home, a friendly crow dropped {b} more into his basket.\n\
                 Mati lined them all up on the windowsill and started counting.\n\
                 How many pebbles does Mati have now? That's your exercise: {a} {symbol} {b}!",
                symbol = request.symbol
            ),
            OperationKind::Subtraction => format!(
                "Mati the cat baked {a} little fish cookies for his friends.\n\
                 The mice next door sneaked in and nibbled {b} of them. Oh no!\n\
                 Mati counted what was left on the plate, whiskers twitching.\n\
                 How many cookies remain? That's your exercise: {a} {symbol} {b}!",
                symbol = request.symbol
            ),
            OperationKind::Multiplication => format!(
                "Mati the cat packed {a} baskets for a picnic.\n\
                 Into each basket he tucked exactly {b} sardines.\n\
                 At the meadow he wondered how big the feast would be.\n\
                 How many sardines in total? That's your exercise: {a} {symbol} {b}!",
                symbol = request.symbol
            ),
            OperationKind::Division => format!(
                "Mati the cat carried {a} berries back from the forest.\n\
                 He wanted to share them fairly between {b} kittens.\n\
                 He dealt them out one by one, purring as he went.\n\
                 How many berries does each kitten get? That's {a} {symbol} {b}!",
                symbol = request.symbol
            ),
            OperationKind::Percent => format!(
                "Mati the cat saw a sign at the fish market: {a}% off today!\n\
                 His favourite pile of sardines usually costs {b} coins.\n\
                 Mati sat down with his notebook to work out the discount.\n\
                 How much is {a}% of {b}? That's your exercise!"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_mentions_both_operands() {
        let teller = StoryTeller;
        let request = StoryRequest {
            kind: OperationKind::Multiplication,
            operands: (3, 2),
            symbol: "×",
        };

        let story = teller.tell(&request);
        assert!(story.contains('3'));
        assert!(story.contains('2'));
        assert!(story.contains('×'));
        // The story must not give the answer away.
        assert!(!story.contains('6'));
    }

    #[test]
    fn each_operation_gets_its_own_scene() {
        let teller = StoryTeller;
        let stories: Vec<String> = OperationKind::ALL
            .iter()
            .map(|kind| {
                teller.tell(&StoryRequest {
                    kind: *kind,
                    operands: (8, 4),
                    symbol: kind.strategy().symbol(),
                })
            })
            .collect();

        for (i, left) in stories.iter().enumerate() {
            for right in stories.iter().skip(i + 1) {
                assert_ne!(left, right);
            }
        }
    }
}
