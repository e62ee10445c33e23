// Copyright (c) 2025 - Cowboy AI, Inc.
//! Client Message Generator
//!
//! Renders the Romanian WhatsApp confirmation message for a booked
//! appointment: greeting, the day and date spelled out in Romanian, the
//! office address, and the checklist of documents the client must bring.
//! Asterisks around the highlights are WhatsApp bold markers.

use crate::domain::{DateKey, SlotTime};
use chrono::{Datelike, Weekday};

/// Office address printed in every message
pub const OFFICE_ADDRESS: &str = "Bulevardul Iuliu Maniu, nr. 7";

/// Lenders a refinancing address can be requested from
pub const REFINANCING_SOURCES: &[&str] = &[
    "AmanetCredit",
    "AmanetQuick",
    "BestCredit",
    "BTDirect",
    "BRDFinance",
    "Credex",
    "Credius",
    "Credissimo",
    "CreditAmanet",
    "CreditFix",
    "CreditPrime",
    "ExtraFinance",
    "Ferratum",
    "Hora",
    "iCredit",
    "IdeaLeasing",
    "INGLease",
    "InstantCredit",
    "JoyCredit",
    "Mobilo",
    "Mozipo",
    "Mogo",
    "OceanCredit",
    "Oney",
    "OTPLeasing",
    "PatriaCredit",
    "Provident",
    "SimpluCredit",
    "TBI",
    "Telecredit",
    "UnicreditConsumer",
    "Viva",
    "Volt",
    "Zaplo",
];

const MONTHS: [&str; 12] = [
    "ianuarie",
    "februarie",
    "martie",
    "aprilie",
    "mai",
    "iunie",
    "iulie",
    "august",
    "septembrie",
    "octombrie",
    "noiembrie",
    "decembrie",
];

/// Document checklist toggles
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    /// Client is a pensioner: pension decision and last coupon
    pub pensioner: bool,

    /// Client brings credit contracts
    pub credit_contracts: bool,

    /// Only one contract instead of all of them
    pub single_contract: bool,

    /// Lenders to request refinancing addresses from
    pub refinancing_sources: Vec<String>,
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Luni",
        Weekday::Tue => "Marți",
        Weekday::Wed => "Miercuri",
        Weekday::Thu => "Joi",
        Weekday::Fri => "Vineri",
        Weekday::Sat => "Sâmbătă",
        Weekday::Sun => "Duminică",
    }
}

fn long_date(date: &DateKey) -> String {
    let d = date.date();
    format!(
        "{:02} {} {}",
        d.day(),
        MONTHS[d.month0() as usize],
        d.year()
    )
}

/// Render the confirmation message for one appointment
pub fn client_message(date: &DateKey, time: &SlotTime, options: &MessageOptions) -> String {
    let mut documents: Vec<String> = Vec::new();
    if options.pensioner {
        documents.push("Decizia de pensionare (în original)".to_string());
        documents.push("Ultimul cupon de pensie".to_string());
    }
    if options.credit_contracts {
        documents.push(if options.single_contract {
            "Contractul de credit (în format fizic sau electronic)".to_string()
        } else {
            "Contractele tuturor creditelor (în format fizic sau electronic)".to_string()
        });
    }
    for source in &options.refinancing_sources {
        documents.push(format!("Adresa de refinanțare {source}"));
    }
    // the id card always closes the list
    documents.push("Buletinul".to_string());

    format!(
        "Bună ziua!\n\
         Conform discuției telefonice, rămâne stabilită întâlnirea de *{day}, {date}*, \
         ora *{time}*. Biroul nostru se află pe *{address}*. Vă rog să mă sunați când \
         ajungeți pentru a vă prelua.\n\
         Pentru refinanțare, vă rog să aveți la dumneavoastră următoarele documente:\n\
         {documents}\n\
         \n\
         Vă aștept la întâlnire. Zi frumoasă!",
        day = weekday_name(date.date().weekday()),
        date = long_date(date),
        time = time,
        address = OFFICE_ADDRESS,
        documents = documents.join("\n"),
    )
}
