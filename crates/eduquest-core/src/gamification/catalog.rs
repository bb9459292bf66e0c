//! Built-in badges and achievement definitions for the school dashboard.

use super::achievement::AchievementDefinition;
use super::badge::{Badge, BadgeCategory, BadgeRarity};
use crate::text::LocalizedText;

fn text(en: &str, es: &str) -> LocalizedText {
    LocalizedText::new(en, es)
}

pub fn badges() -> Vec<Badge> {
    vec![
        Badge::new(
            "first-login",
            text("First Steps", "Primeros pasos"),
            text("Logged in for the first time", "Iniciaste sesión por primera vez"),
            "footprints",
            BadgeRarity::Common,
            BadgeCategory::Special,
        ),
        Badge::new(
            "homework-hero",
            text("Homework Hero", "Héroe de las tareas"),
            text("Handed in 10 assignments on time", "Entregaste 10 tareas a tiempo"),
            "book-check",
            BadgeRarity::Rare,
            BadgeCategory::Academic,
        ),
        Badge::new(
            "perfect-attendance",
            text("Perfect Attendance", "Asistencia perfecta"),
            text("Present every school day for a month", "Presente todos los días de clase durante un mes"),
            "calendar-check",
            BadgeRarity::Epic,
            BadgeCategory::Attendance,
        ),
        Badge::new(
            "bookworm",
            text("Bookworm", "Ratón de biblioteca"),
            text("Finished 5 books", "Terminaste 5 libros"),
            "book-open",
            BadgeRarity::Rare,
            BadgeCategory::Academic,
        ),
        Badge::new(
            "helping-hand",
            text("Helping Hand", "Mano amiga"),
            text("Helped a classmate with their work", "Ayudaste a un compañero con su trabajo"),
            "hand-heart",
            BadgeRarity::Common,
            BadgeCategory::Behavior,
        ),
        Badge::new(
            "class-voice",
            text("Class Voice", "Voz de la clase"),
            text("Took part in 20 class discussions", "Participaste en 20 debates de clase"),
            "message-circle",
            BadgeRarity::Common,
            BadgeCategory::Participation,
        ),
        Badge::new(
            "top-scholar",
            text("Top Scholar", "Mejor estudiante"),
            text("Reached the Scholar rank", "Alcanzaste el rango de Erudito"),
            "trophy",
            BadgeRarity::Legendary,
            BadgeCategory::Academic,
        ),
    ]
}

pub fn badge(id: &str) -> Option<Badge> {
    badges().into_iter().find(|b| b.id == id)
}

pub fn achievements() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition::new(
            "homework-10",
            text("Ten on Time", "Diez a tiempo"),
            text("Submit 10 homework assignments", "Entrega 10 tareas"),
            10,
        ),
        AchievementDefinition::new(
            "attendance-30",
            text("Always There", "Siempre presente"),
            text("Attend 30 school days", "Asiste 30 días de clase"),
            30,
        ),
        AchievementDefinition::new(
            "reading-5-books",
            text("Five Books", "Cinco libros"),
            text("Finish reading 5 books", "Termina de leer 5 libros"),
            5,
        ),
        AchievementDefinition::new(
            "login-7-days",
            text("Week Streak", "Racha semanal"),
            text("Log in 7 days in a row", "Inicia sesión 7 días seguidos"),
            7,
        ),
    ]
}
