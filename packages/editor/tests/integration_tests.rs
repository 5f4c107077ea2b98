//! Integration tests for editor crate

use chrono::NaiveDate;
use std::sync::Arc;
use weddingsite_document::{
    DocumentPatch, FaqField, MilestoneField, PartyGroup, PartyMemberField, ScalarField,
    WeddingDocument,
};
use weddingsite_editor::{
    countdown_between, CloseChoice, CloseRequest, Countdown, CountdownReading, EditableField,
    FieldMode, FormSession, InMemoryGateway, JsonFileGateway, PersistenceGateway, Persister,
    SaveNotice, SavePayload, SectionKind,
};

fn wedding() -> WeddingDocument {
    let mut doc = WeddingDocument::new("w-1", "owner-1");
    let mut patch = DocumentPatch::new();
    patch.set_scalar(ScalarField::CoupleName1, "Ana");
    patch.set_scalar(ScalarField::CoupleName2, "Ben");
    patch.set_scalar(ScalarField::WeddingDate, "2025-06-15");
    patch.set_scalar(ScalarField::VenueName, "Old Barn");
    doc.apply(&patch);
    doc
}

#[test]
fn test_countdown_to_ceremony_instant() {
    let doc = wedding();
    let target = doc
        .ceremony_instant(weddingsite_editor::default_ceremony_time())
        .unwrap();
    let now = NaiveDate::from_ymd_opt(2025, 6, 10)
        .unwrap()
        .and_hms_opt(15, 0, 4)
        .unwrap();

    assert_eq!(
        countdown_between(target, now),
        CountdownReading::Remaining(Countdown {
            days: 4,
            hours: 23,
            minutes: 59,
            seconds: 56,
        })
    );
    assert!(countdown_between(target, target + chrono::Duration::days(1)).is_elapsed());
}

#[test]
fn test_in_place_edit_lifecycle() {
    let mut doc = wedding();
    let mut venue = EditableField::new(ScalarField::VenueName);

    venue.start(&doc);
    venue.on_draft_change("Lakeside");
    venue.on_draft_change("Lakeside Hall");
    assert_eq!(doc.scalar(ScalarField::VenueName), "Old Barn");

    let change = venue.save(&mut doc).unwrap();
    assert_eq!(doc.scalar(ScalarField::VenueName), "Lakeside Hall");
    assert_eq!(change.patch.keys(), vec!["venue_name"]);
    assert_eq!(venue.mode(), FieldMode::Viewing);

    // Cancel leaves the document alone and is repeatable
    venue.start(&doc);
    venue.on_draft_change("Nowhere");
    assert!(venue.cancel());
    assert!(!venue.cancel());
    assert_eq!(doc.scalar(ScalarField::VenueName), "Lakeside Hall");
}

#[test]
fn test_story_session_with_timeline_edits() {
    let mut doc = wedding();
    let mut session = FormSession::open(SectionKind::Story, &doc);
    assert!(!session.is_dirty());

    let first = session.add_milestone().unwrap();
    let second = session.add_milestone().unwrap();
    let timeline = session.timeline_mut().unwrap();
    timeline.set_field_draft(first, MilestoneField::Title, "We Met");
    timeline.set_field_draft(second, MilestoneField::Title, "Engaged");
    timeline.remove_item(first);
    session.set_field(ScalarField::TheirStory, "It started at a bookshop.");

    assert!(session.is_dirty());
    assert!(session.can_submit());
    let change = session.submit(&mut doc).unwrap();

    assert_eq!(change.patch.keys(), vec!["their_story", "story_timeline"]);
    assert_eq!(doc.story_timeline().len(), 1);
    assert_eq!(doc.story_timeline()[0].title, "Engaged");
    assert_eq!(doc.scalar(ScalarField::TheirStory), "It started at a bookshop.");
    assert!(!session.is_dirty());
    assert_eq!(session.request_close(), CloseRequest::Closed);
}

#[test]
fn test_discarding_a_dirty_party_form() {
    let mut doc = wedding();
    let mut session = FormSession::open(SectionKind::Party, &doc);

    let key = session.add_party_member(PartyGroup::Bridal).unwrap();
    session
        .party_mut(PartyGroup::Bridal)
        .unwrap()
        .set_field_draft(key, PartyMemberField::Name, "Cara");

    assert_eq!(session.request_close(), CloseRequest::ConfirmationRequired);
    assert!(!session.can_submit(), "role is still blank");

    assert!(session
        .resolve_close(CloseChoice::DiscardAndClose, &mut doc)
        .is_none());
    assert!(!session.is_open());
    assert!(doc.party(PartyGroup::Bridal).is_empty());
    assert_eq!(doc.version(), 1);
}

#[test]
fn test_save_and_close_from_confirmation() {
    let mut doc = wedding();
    let mut session = FormSession::open(SectionKind::Faq, &doc);

    let key = session.add_faq().unwrap();
    session
        .faqs_mut()
        .unwrap()
        .set_field_draft(key, FaqField::Question, "Is there parking?");

    assert_eq!(session.request_close(), CloseRequest::ConfirmationRequired);
    let change = session
        .resolve_close(CloseChoice::SaveAndClose, &mut doc)
        .unwrap();

    assert_eq!(change.version, doc.version());
    assert_eq!(doc.faqs()[0].question, "Is there parking?");
    assert!(!doc.faqs()[0].id.is_empty());
}

#[tokio::test]
async fn test_failed_save_keeps_local_document_and_retries() {
    let gateway = Arc::new(InMemoryGateway::with_document(wedding()));
    let (persister, mut notices) = Persister::new(gateway.clone(), "owner-1");
    let mut doc = persister.load().await.unwrap().unwrap();

    gateway.fail_next("503 Service Unavailable");
    let mut venue = EditableField::new(ScalarField::VenueName);
    venue.start(&doc);
    venue.on_draft_change("Lakeside Hall");
    let change = venue.save(&mut doc).unwrap();
    persister.persist_change(&change);

    let notice = notices.recv().await.unwrap();
    assert!(matches!(notice, SaveNotice::Failed { .. }));
    assert_eq!(doc.scalar(ScalarField::VenueName), "Lakeside Hall");
    assert_eq!(
        gateway.get("owner-1").unwrap().scalar(ScalarField::VenueName),
        "Old Barn"
    );

    persister.retry(notice).unwrap().await.unwrap();
    assert!(notices.recv().await.unwrap().is_saved());
    assert_eq!(
        gateway.get("owner-1").unwrap().scalar(ScalarField::VenueName),
        "Lakeside Hall"
    );
}

#[tokio::test]
async fn test_session_change_persists_to_json_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let gateway = Arc::new(JsonFileGateway::new(dir.path()));
    gateway
        .save("owner-1", &SavePayload::Full(wedding()))
        .unwrap();

    let (persister, mut notices) = Persister::new(gateway.clone(), "owner-1");
    let mut doc = persister.load().await.unwrap().unwrap();

    let mut session = FormSession::open(SectionKind::Home, &doc);
    session.set_field(ScalarField::WeddingDate, "2026-09-12");
    let change = session.submit(&mut doc).unwrap();
    persister.persist_change(&change).await.unwrap();
    assert!(notices.recv().await.unwrap().is_saved());

    let stored = gateway.load("owner-1").unwrap().unwrap();
    assert_eq!(stored.wedding_day(), NaiveDate::from_ymd_opt(2026, 9, 12));
    assert_eq!(stored.scalar(ScalarField::CoupleName1), "Ana");
}
