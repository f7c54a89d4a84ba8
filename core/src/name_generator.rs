//! Deterministic name generation using curated name lists.
//!
//! Replaces locale-aware faker libraries with fixed Nordic name pools so
//! the same RNG seed always yields the same names.

use crate::rng::StageRng;

pub struct NameGenerator;

impl NameGenerator {
    /// Generate a full personal name (first + last) deterministically.
    pub fn person(rng: &mut StageRng) -> String {
        let first = rng.pick(Self::first_names());
        let last = rng.pick(Self::last_names());
        format!("{first} {last}")
    }

    /// Generate a company name for counterparties.
    pub fn company(rng: &mut StageRng) -> String {
        let suffix = rng.pick(Self::company_suffixes());
        // Format: "Prefix Industry Suffix" or "LastName Industry Suffix"
        if rng.chance(0.5) {
            let prefix = rng.pick(Self::company_prefixes());
            let industry = rng.pick(Self::company_industries());
            format!("{prefix} {industry} {suffix}")
        } else {
            let last = rng.pick(Self::last_names());
            let industry = rng.pick(Self::company_industries());
            format!("{last} {industry} {suffix}")
        }
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "Erik", "Lars", "Anders", "Johan", "Karl", "Nils", "Mikael", "Henrik",
            "Fredrik", "Magnus", "Jonas", "Oskar", "Gustav", "Axel", "Emil", "Viktor",
            "Mats", "Stefan", "Björn", "Leif", "Ole", "Kjell", "Arne", "Espen",
            "Sander", "Jesper", "Mads", "Rasmus", "Kasper", "Mikkel", "Jukka", "Mika",
            "Juha", "Antti", "Pekka", "Ville", "Timo", "Sami", "Jari", "Eero",
            "Willem", "Daan", "Bram", "Sven", "Thomas", "Martin", "Peter", "Jan",
            "Anna", "Maria", "Karin", "Ingrid", "Eva", "Linnea", "Sofia", "Emma",
            "Astrid", "Elin", "Sara", "Hanna", "Ida", "Frida", "Maja", "Elsa",
            "Agnes", "Alma", "Signe", "Tuva", "Nora", "Thea", "Mette", "Lene",
            "Kirsten", "Freja", "Sanna", "Aino", "Helmi", "Venla", "Noora", "Emilia",
            "Sofie", "Lotte", "Fleur", "Sanne", "Femke", "Marit", "Liv", "Solveig",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Andersson", "Johansson", "Karlsson", "Nilsson", "Eriksson", "Larsson",
            "Olsson", "Persson", "Svensson", "Gustafsson", "Pettersson", "Jonsson",
            "Lindberg", "Lindqvist", "Axelsson", "Bergström", "Lundgren", "Sandberg",
            "Hansen", "Johansen", "Olsen", "Larsen", "Pedersen", "Nilsen",
            "Kristiansen", "Jensen", "Andersen", "Sørensen", "Rasmussen", "Jørgensen",
            "Thomsen", "Christensen", "Madsen", "Mortensen", "Holm", "Dahl",
            "Korhonen", "Virtanen", "Mäkinen", "Nieminen", "Hämäläinen", "Laine",
            "Heikkinen", "Koskinen", "Järvinen", "Lehtonen", "Salminen", "Aho",
            "de Vries", "Jansen", "van den Berg", "Bakker", "Visser", "Smit",
            "Meijer", "de Boer", "Mulder", "de Groot", "Bos", "Vos",
        ]
    }

    fn company_prefixes() -> &'static [&'static str] {
        &[
            "Nordisk", "Svea", "Fjord", "Baltic", "Polar", "Viking", "Skandia",
            "Arctic", "Hansa", "Botnia", "Øresund", "Kalmar", "Delta", "Atlas",
        ]
    }

    fn company_suffixes() -> &'static [&'static str] {
        &[
            "AB", "A/S", "AS", "Oy", "BV", "ApS", "Group", "Holding",
            "Partners", "Trading", "Logistics", "Solutions",
        ]
    }

    fn company_industries() -> &'static [&'static str] {
        &[
            "Textil", "Elektronik", "Shipping", "Agro", "Consulting",
            "Bygg", "Transport", "Energi", "Marin", "Import",
            "Export", "Industri", "Teknik", "Handel",
        ]
    }
}
