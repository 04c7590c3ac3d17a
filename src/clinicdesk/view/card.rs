use super::{DOCTOR_CARD_TEMPLATE, DOCTOR_LIST_TEMPLATE, render};
use crate::error::Result;
use crate::model::Doctor;
use crate::session::Viewer;
use serde::Serialize;

/// The single action a card exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardAction {
    /// Admin only: remove the doctor.
    Delete,
    /// Logged-in patient: open the booking overlay.
    Book,
    /// "Book Now" that only asks the user to log in.
    LoginPrompt,
    #[serde(rename = "none")]
    NoAction,
}

impl CardAction {
    pub fn for_viewer(viewer: &Viewer) -> Self {
        match viewer {
            Viewer::Admin => CardAction::Delete,
            Viewer::Guest => CardAction::LoginPrompt,
            Viewer::Patient { .. } => CardAction::Book,
            Viewer::Doctor => CardAction::NoAction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCard {
    pub doctor: Doctor,
    pub action: CardAction,
}

/// Template data for one card; layout strings are computed here.
#[derive(Serialize)]
struct CardData<'a> {
    id: i64,
    name: &'a str,
    specialty: &'a str,
    email: &'a str,
    times: String,
    action: CardAction,
}

impl<'a> From<&'a DoctorCard> for CardData<'a> {
    fn from(card: &'a DoctorCard) -> Self {
        Self {
            id: card.doctor.id,
            name: &card.doctor.name,
            specialty: &card.doctor.specialty,
            email: &card.doctor.email,
            times: card.doctor.available_times.join(", "),
            action: card.action,
        }
    }
}

/// Build the card for a doctor as seen by `viewer`.
pub fn doctor_card(doctor: &Doctor, viewer: &Viewer) -> DoctorCard {
    DoctorCard {
        doctor: doctor.clone(),
        action: CardAction::for_viewer(viewer),
    }
}

impl DoctorCard {
    pub fn id(&self) -> i64 {
        self.doctor.id
    }

    pub fn to_html(&self) -> Result<String> {
        render(
            DOCTOR_CARD_TEMPLATE,
            minijinja::context! { card => CardData::from(self) },
        )
    }
}

pub const NO_DOCTORS_MESSAGE: &str = "No doctors found with the given filters.";

/// What the admin dashboard's content container currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorListContent {
    Cards(Vec<DoctorCard>),
    Message(String),
}

/// The `content` container of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorList {
    content: DoctorListContent,
}

impl Default for DoctorList {
    fn default() -> Self {
        Self {
            content: DoctorListContent::Cards(Vec::new()),
        }
    }
}

impl DoctorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is shown with one card per doctor, in order.
    pub fn show_doctors(&mut self, doctors: &[Doctor], viewer: &Viewer) {
        let cards = doctors.iter().map(|d| doctor_card(d, viewer)).collect();
        self.content = DoctorListContent::Cards(cards);
    }

    pub fn show_message(&mut self, message: impl Into<String>) {
        self.content = DoctorListContent::Message(message.into());
    }

    /// Remove the card for `id`. Returns whether a card was removed.
    pub fn remove_card(&mut self, id: i64) -> bool {
        match &mut self.content {
            DoctorListContent::Cards(cards) => match cards.iter().position(|c| c.id() == id) {
                Some(pos) => {
                    cards.remove(pos);
                    true
                }
                None => false,
            },
            DoctorListContent::Message(_) => false,
        }
    }

    pub fn content(&self) -> &DoctorListContent {
        &self.content
    }

    pub fn cards(&self) -> &[DoctorCard] {
        match &self.content {
            DoctorListContent::Cards(cards) => cards,
            DoctorListContent::Message(_) => &[],
        }
    }

    pub fn card(&self, id: i64) -> Option<&DoctorCard> {
        self.cards().iter().find(|c| c.id() == id)
    }

    pub fn message(&self) -> Option<&str> {
        match &self.content {
            DoctorListContent::Message(m) => Some(m),
            DoctorListContent::Cards(_) => None,
        }
    }

    pub fn to_html(&self) -> Result<String> {
        let cards: Vec<CardData<'_>> = self.cards().iter().map(CardData::from).collect();
        render(
            DOCTOR_LIST_TEMPLATE,
            minijinja::context! { cards => cards, message => self.message() },
        )
    }
}
