//! End-to-end flows across the deck, gestures, overlay and wizard, driven
//! by in-memory backends.

use std::sync::{Arc, Mutex};

use prom_core::{
    AuthContext, Candidate, DeckController, DeckEvent, DeckStatus, Gender, Grade, Profile,
    ProfileCreated, ProfileCreator, ProfileSubmission, ProfileWizard, Session, Socials,
    SubmissionError, SwipeIntent, SwipeResponse, SwipeSubmitter, WizardPhase,
};

/// Matches on every `Like` of a target whose id starts with `match-`.
#[derive(Default)]
struct Backend {
    swipes: Mutex<Vec<(String, String, &'static str)>>,
    profiles: Mutex<Vec<ProfileSubmission>>,
}

impl SwipeSubmitter for Backend {
    async fn submit(
        &self,
        user_id: &str,
        target_user_id: &str,
        intent: SwipeIntent,
    ) -> Result<SwipeResponse, SubmissionError> {
        self.swipes.lock().unwrap().push((
            user_id.to_string(),
            target_user_id.to_string(),
            intent.action(),
        ));
        if target_user_id == "offline" {
            return Err(SubmissionError::new("connection refused"));
        }
        let mutual = target_user_id.starts_with("match-") && intent != SwipeIntent::Pass;
        Ok(SwipeResponse {
            match_created: mutual,
            is_super_match: mutual && intent == SwipeIntent::SuperLike,
        })
    }
}

impl ProfileCreator for Backend {
    async fn create_profile(
        &self,
        profile: &ProfileSubmission,
    ) -> Result<ProfileCreated, SubmissionError> {
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(ProfileCreated { success: true })
    }
}

fn candidate(user_id: &str, name: &str) -> Candidate {
    Candidate {
        user_id: user_id.to_string(),
        profile: Profile {
            name: name.to_string(),
            bio: String::new(),
            hobbies: vec!["robotics".to_string()],
            grade: Grade::Sophomore,
            gender: Gender::Female,
            profile_pic_url: None,
            socials: Socials::default(),
            looking_for: Vec::new(),
            personality: None,
            question_answers: Default::default(),
        },
        compatibility_percentage: 80.0,
    }
}

#[tokio::test]
async fn swipe_session_from_sign_in_to_exhaustion() {
    let mut session = Session::new();
    let auth = session.sign_in("me").cloned().unwrap();
    let backend = Backend::default();
    let events = Arc::new(Mutex::new(Vec::new()));

    let mut deck = DeckController::new(
        auth,
        &backend,
        vec![
            candidate("match-a", "Avery"),
            candidate("b", "Blake"),
            candidate("offline", "Casey"),
        ],
    );
    let sink = Arc::clone(&events);
    deck.subscribe(move |e: &DeckEvent| sink.lock().unwrap().push(e.clone()));

    // A long fast drag to the right on the first card.
    let result = deck.release(180.0, 900.0).await.unwrap().unwrap();
    assert!(result.match_created);
    assert_eq!(deck.deck().cursor(), 1);
    assert_eq!(deck.overlay().profile().unwrap().name, "Avery");
    assert_eq!(deck.deck().position(), Some((2, 3)));

    deck.dismiss_match();
    assert!(!deck.overlay().is_visible());

    // A short slow drag snaps back without submitting.
    assert!(deck.release(30.0, 100.0).await.is_none());
    assert_eq!(deck.deck().cursor(), 1);

    // A flick to the left passes on Blake.
    let result = deck.release(-20.0, -800.0).await.unwrap().unwrap();
    assert!(!result.match_created);

    // The last submission fails but the deck still moves on.
    assert!(deck.advance(SwipeIntent::Like).await.is_err());
    assert_eq!(deck.status(), DeckStatus::Exhausted);
    assert_eq!(
        deck.status().message().map(|(heading, _)| heading),
        Some("You're All Caught Up!")
    );

    let swipes = backend.swipes.lock().unwrap();
    let actions: Vec<_> = swipes.iter().map(|(_, t, a)| (t.as_str(), *a)).collect();
    assert_eq!(
        actions,
        vec![("match-a", "yes"), ("b", "no"), ("offline", "yes")]
    );

    let events = events.lock().unwrap();
    assert!(events.iter().any(|e| matches!(e, DeckEvent::MatchShown { .. })));
    assert!(events.iter().any(|e| matches!(e, DeckEvent::Exhausted)));
    let errors = events
        .iter()
        .filter(|e| matches!(e, DeckEvent::Notice(n) if n.is_error()))
        .count();
    assert_eq!(errors, 1);
}

#[tokio::test]
async fn super_like_after_undo_reaches_the_same_card() {
    let backend = Backend::default();
    let mut deck = DeckController::new(
        AuthContext::new("me"),
        &backend,
        vec![candidate("match-a", "Avery"), candidate("b", "Blake")],
    );

    deck.advance(SwipeIntent::Pass).await.unwrap();
    assert_eq!(deck.undo().unwrap(), 0);
    let result = deck.advance(SwipeIntent::SuperLike).await.unwrap();

    assert!(result.is_super_match);
    assert!(deck.overlay().is_super_match());
    assert_eq!(backend.swipes.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn new_profile_then_first_swipe() {
    let backend = Backend::default();
    let auth = AuthContext::new("newcomer");

    let mut wizard = ProfileWizard::new();
    {
        let draft = wizard.draft_mut();
        draft.name = "Riley".to_string();
        draft.set_bio("New in town.").unwrap();
        draft.gender = Some(Gender::NonBinary);
        draft.grade = Some(Grade::Freshman);
        draft.toggle_looking_for(Gender::Male);
        draft.add_hobby("skating");
        draft.add_hobby("anime");
    }
    wizard.next_step().unwrap();
    wizard.next_step().unwrap();
    wizard.next_step().unwrap();
    assert!(!wizard.can_submit());
    wizard.draft_mut().personality =
        "I talk to strangers on the bus and usually end up with a new friend.".to_string();
    assert!(wizard.can_submit());

    wizard.submit(&auth, &backend).await.unwrap();
    assert_eq!(wizard.phase(), WizardPhase::Completed);
    assert_eq!(backend.profiles.lock().unwrap()[0].user_id, "newcomer");

    let mut deck = DeckController::new(auth, &backend, vec![candidate("match-z", "Zoe")]);
    deck.advance(SwipeIntent::Like).await.unwrap();
    assert_eq!(deck.status(), DeckStatus::Exhausted);
}
