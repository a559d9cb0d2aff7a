//! Bundled scenario content.
//!
//! Scripts are plain data; this module builds them in code so the crate
//! works out of the box. Content strings are opaque to the engine.

use rustc_hash::FxHashMap;

use crate::schema::choice::{ChoiceId, ChoiceOption, OutcomeTag};
use crate::schema::message::Attachment;
use crate::schema::round::{Branch, BranchId, Round};
use crate::schema::script::{EndingTexts, RouteKey, Script, Transition};

fn choice(id: &str, tag: OutcomeTag, display: &str, continuation: &str) -> ChoiceOption {
    ChoiceOption {
        id: ChoiceId::from(id),
        display_text: display.to_string(),
        continuation_text: continuation.to_string(),
        outcome_tag: tag,
    }
}

fn rejection(mockery: &str) -> String {
    format!(
        "You scramble to type an apology, but the send button only returns an error. \
         Blocked.\n\
         Days later a screenshot of a chat thread that looks exactly like yours surfaces \
         on the timeline, tens of thousands of reposts deep, captioned \"{mockery}\".\n\
         Your real name gets dug up by the weekend. You quietly delete every account and \
         disappear from the net."
    )
}

/// The default seven-round chat courtship.
///
/// Rounds 0 and 1 always advance. Social and mental risks open at round
/// 2; round 4 is the fork that resolves the Saturday meetup into one of
/// the two branches; round 5 is the transition placeholder shown to no
/// one; round 6 delegates entirely to the resolved branch.
pub fn saturday_promise() -> Script {
    use OutcomeTag::{Bad, Best, Good, Neutral};

    let rounds = vec![
        Round {
            index: 0,
            prompt: "heyyy you're on! did you catch the patch notes? the new season looks \
                     completely unhinged lol"
                .to_string(),
            choices: vec![
                choice(
                    "1A",
                    Good,
                    "Yeah, the balance changes are wild. Wanna duo later and find out?",
                    "omg yes. you're the only one who doesn't rage quit on me.",
                ),
                choice(
                    "1B",
                    Neutral,
                    "Not yet, work ate my whole day.",
                    "boooo. okay summary: everything we main got nerfed. mourn with me.",
                ),
                choice(
                    "1C",
                    Neutral,
                    "Patch notes are for nerds. I just queue.",
                    "chaotic. respect. that's why your winrate is a coin flip lol",
                ),
            ],
            attachment: None,
        },
        Round {
            index: 1,
            prompt: "look what I made tonight!! first ever attempt at gyoza from scratch"
                .to_string(),
            choices: vec![
                choice(
                    "2A",
                    Best,
                    "That looks amazing. You'd put the place near my office out of business.",
                    "ehehe. flattery logged. next time I make too many you might get \
                     drafted as taste tester.",
                ),
                choice(
                    "2B",
                    Good,
                    "Did you burn the first batch though? Be honest.",
                    "...the first batch does not exist. we do not speak of the first batch.",
                ),
                choice(
                    "2C",
                    Neutral,
                    "Store-bought wrappers or real ones?",
                    "handmade!! do you know how long that took. appreciate me.",
                ),
            ],
            attachment: Some(Attachment("attachment://gyoza.jpg".to_string())),
        },
        Round {
            index: 2,
            prompt: "random but. isn't it weird we've talked every night for a year and I \
                     don't even know what you look like lol"
                .to_string(),
            choices: vec![
                choice(
                    "3A",
                    Good,
                    "Weird in a good way. You know me better than people who see my face daily.",
                    "yeah. same, honestly. okay that got sincere, gross. anyway.",
                ),
                choice(
                    "3B",
                    Bad,
                    "I could fix that. What's your address? I'll just come say hi.",
                    "...what? that's not funny. why would you say that.",
                ),
                choice(
                    "3C",
                    Bad,
                    "I looked you up already. You post more than you think.",
                    "...I have to go.",
                ),
            ],
            attachment: None,
        },
        Round {
            index: 3,
            prompt: "okay serious question. the meetup thing people keep joking about in \
                     the server. would that be fun or a disaster"
                .to_string(),
            choices: vec![
                choice(
                    "4A",
                    Bad,
                    "Only if you dress up for it. Post a fit check for approval first.",
                    "approval?? wow. woooow. okay.",
                ),
                choice(
                    "4B",
                    Good,
                    "Fun. Zero pressure though, only if you'd actually be comfortable.",
                    "look at you being considerate. okay. noted. filed under 'maybe'.",
                ),
                choice(
                    "4C",
                    Bad,
                    "A disaster. Everyone online is disappointing in person. You'd be no \
                     different.",
                    "oh. okay. good to know.",
                ),
            ],
            attachment: None,
        },
        Round {
            index: 4,
            prompt: "so. hypothetically. if I said I'm free this saturday, what would you \
                     hypothetically do about it"
                .to_string(),
            choices: vec![
                choice(
                    "5A",
                    Bad,
                    "Hypothetically nothing. Leaving the house is for people with something \
                     to prove.",
                    "right. hypothetical. of course. forget I asked.",
                ),
                choice(
                    "5B",
                    Good,
                    "Arcade crawl, loser buys dinner. As rivals, obviously.",
                    "oh you are SO on. I hope you like paying for dinner.",
                ),
                choice(
                    "5C",
                    Best,
                    "I'd book that little izakaya you keep sending screenshots of. Just us.",
                    "...you remembered that? okay. yes. it's a date then.",
                ),
            ],
            attachment: None,
        },
        // Transition placeholder while the meetup confirmation plays out.
        Round {
            index: 5,
            prompt: String::new(),
            choices: Vec::new(),
            attachment: None,
        },
        // Post-fork round; presentation is fully delegated to the branch.
        Round {
            index: 6,
            prompt: String::new(),
            choices: Vec::new(),
            attachment: None,
        },
    ];

    let mut branches = FxHashMap::default();
    branches.insert(
        BranchId::Dinner,
        Branch {
            id: BranchId::Dinner,
            prompt: "(saturday, 6pm. she's outside the izakaya in a coat you've never \
                     seen, waving) you actually came. okay. wow. hi. I rehearsed this \
                     and it's already gone."
                .to_string(),
            choices: vec![
                choice(
                    "6AA",
                    Bad,
                    "Wow, you look completely different from your avatar. Catfish much?",
                    "...excuse me?",
                ),
                choice(
                    "6AB",
                    Best,
                    "Hi. You're exactly how I imagined, somehow. Shall we?",
                    "(she laughs, shoulders dropping) okay. yeah. we shall. first round's \
                     on me.",
                ),
                choice(
                    "6AC",
                    Bad,
                    "Let's keep this short. I have another thing at eight.",
                    "oh. sure. short. got it.",
                ),
            ],
        },
    );
    branches.insert(
        BranchId::Hangout,
        Branch {
            id: BranchId::Hangout,
            prompt: "(saturday, 1pm at the arcade entrance. she's already holding a card \
                     loaded with credits) you're late by ninety seconds and I'm counting \
                     it as a forfeit."
                .to_string(),
            choices: vec![
                choice(
                    "6BA",
                    Good,
                    "Dispute filed. Winner takes all on the rhythm game, right now.",
                    "accepted. prepare to finance my dinner, rival.",
                ),
                choice(
                    "6BB",
                    Bad,
                    "You really came alone? Figured you'd chicken out without your mods.",
                    "...what is that supposed to mean?",
                ),
                choice(
                    "6BC",
                    Bad,
                    "Honestly I only came because staying home felt sadder.",
                    "wow. glad to be the less sad option, I guess.",
                ),
            ],
        },
    );

    let mut routes = FxHashMap::default();
    let mut route = |key: RouteKey, id: &str, transition: Transition| {
        routes.insert((key, ChoiceId::from(id)), transition);
    };

    for id in ["1A", "1B", "1C"] {
        route(RouteKey::Main(0), id, Transition::Advance);
    }
    for id in ["2A", "2B", "2C"] {
        route(RouteKey::Main(1), id, Transition::Advance);
    }

    route(RouteKey::Main(2), "3A", Transition::Advance);
    route(
        RouteKey::Main(2),
        "3B",
        Transition::EndSocial {
            rejection: rejection("he asked for her ADDRESS on day one lmaooo"),
            failed_text: "It was a joke!!".to_string(),
        },
    );
    route(RouteKey::Main(2), "3C", Transition::EndMental);

    route(
        RouteKey::Main(3),
        "4A",
        Transition::EndSocial {
            rejection: rejection("a fit check. for his APPROVAL. run"),
            failed_text: "Joking!! mostly...".to_string(),
        },
    );
    route(RouteKey::Main(3), "4B", Transition::Advance);
    route(RouteKey::Main(3), "4C", Transition::EndMental);

    route(RouteKey::Main(4), "5A", Transition::EndMental);
    route(RouteKey::Main(4), "5B", Transition::Fork(BranchId::Hangout));
    route(RouteKey::Main(4), "5C", Transition::Fork(BranchId::Dinner));

    route(
        RouteKey::Branch(BranchId::Dinner),
        "6AA",
        Transition::EndSocial {
            rejection: rejection("called her a catfish. to her face. at the door"),
            failed_text: "That came out wrong!".to_string(),
        },
    );
    route(RouteKey::Branch(BranchId::Dinner), "6AB", Transition::EndWin);
    route(RouteKey::Branch(BranchId::Dinner), "6AC", Transition::EndMental);

    route(RouteKey::Branch(BranchId::Hangout), "6BA", Transition::EndWin);
    route(
        RouteKey::Branch(BranchId::Hangout),
        "6BB",
        Transition::EndSocial {
            rejection: rejection("'thought you'd chicken out' is a wild opener"),
            failed_text: "Wait, that's not what I meant".to_string(),
        },
    );
    route(RouteKey::Branch(BranchId::Hangout), "6BC", Transition::EndMental);

    Script {
        rounds,
        branches,
        routes,
        system_fork_text: "Saturday. The promised day.".to_string(),
        endings: EndingTexts {
            won_warm: "(at the izakaya, cup in hand, a little flushed and laughing) \
                       ...whew. perfect. booking ahead was the right call, this place is \
                       packed. you did say you'd stay through the karaoke closer, you \
                       haven't forgotten, right?\n\
                       honestly I could do this again tomorrow. and the day after. well. \
                       drinks taste better with you around, so I'll survive next week's \
                       shift somehow.\n\
                       ...as thanks. next time, my place. real homemade snacks. brace \
                       yourself."
                .to_string(),
            won_friend: "At the izakaya she laughs \"you're genuinely the worst, you know \
                         that,\" while drumming on your head. It isn't the flutter of a \
                         romance, but arm in arm, trading jabs, you've become the most \
                         comfortable kind of partner in crime.\n\
                         The homemade-dinner offer never comes up again, but the rotation \
                         of net and real life keeps going, a friendship close enough to \
                         rot in happily."
                .to_string(),
            lost_mental: "Moments later her icon turns into a plain black square and her \
                          name drops off your friends list.\n\
                          Days later a single long post appears on her account. \"This is \
                          her mother. Thank you to everyone who was kind to my daughter. \
                          She is currently...\"\n\
                          You haven't managed to read past that line. Where she is now, \
                          and how she's doing, you no longer have any way to know."
                .to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_scenario_validates() {
        saturday_promise().validate().unwrap();
    }

    #[test]
    fn seven_rounds_two_branches() {
        let script = saturday_promise();
        assert_eq!(script.main_sequence_length(), 7);
        assert_eq!(script.branches.len(), 2);
    }

    #[test]
    fn round_one_carries_media() {
        let script = saturday_promise();
        assert!(script.rounds[1].attachment.is_some());
        assert!(script.rounds[0].attachment.is_none());
    }

    #[test]
    fn late_rounds_are_delegated() {
        let script = saturday_promise();
        assert!(script.rounds[5].choices.is_empty());
        assert!(script.rounds[6].choices.is_empty());
    }

    #[test]
    fn fork_targets_both_branches() {
        let script = saturday_promise();
        assert_eq!(
            script.route(RouteKey::Main(4), &ChoiceId::from("5B")),
            Some(&Transition::Fork(BranchId::Hangout))
        );
        assert_eq!(
            script.route(RouteKey::Main(4), &ChoiceId::from("5C")),
            Some(&Transition::Fork(BranchId::Dinner))
        );
    }

    #[test]
    fn social_rejections_are_choice_specific() {
        let script = saturday_promise();
        let social: Vec<&str> = script
            .routes
            .values()
            .filter_map(|t| match t {
                Transition::EndSocial { rejection, .. } => Some(rejection.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(social.len(), 4);
        for (i, a) in social.iter().enumerate() {
            for b in &social[i + 1..] {
                assert_ne!(a, b, "each social ending keeps its own variant");
            }
        }
    }

    #[test]
    fn ending_texts_present() {
        let endings = saturday_promise().endings;
        assert!(!endings.won_warm.is_empty());
        assert!(!endings.won_friend.is_empty());
        assert!(!endings.lost_mental.is_empty());
    }
}
