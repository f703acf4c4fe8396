//! MOL Campaign Tracker - Character sheet core for a tabletop campaign
//!
//! The tracker keeps one player character:
//! - Attributes, health and the mana pool derived from the Shaping domain
//! - A tree of learned domains, spells, techniques and skills with XP
//! - Undo over every change
//! - Auto-save, named save slots and file export/import

pub mod application;
pub mod domain;
pub mod infrastructure;
