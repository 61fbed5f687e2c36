//! Name registry: canonical names and user aliases for bodies, signs,
//! aspects and natal tags.

use crate::aspects::Aspect;
use crate::body::BodyId;
use crate::zodiac::Sign;
use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref CANONICAL_BODIES: Vec<(&'static str, BodyId)> = {
        let mut names = vec![
            ("sun", BodyId::SUN),
            ("moon", BodyId::MOON),
            ("mercury", BodyId::MERCURY),
            ("venus", BodyId::VENUS),
            ("mars", BodyId::MARS),
            ("jupiter", BodyId::JUPITER),
            ("saturn", BodyId::SATURN),
            ("uranus", BodyId::URANUS),
            ("neptune", BodyId::NEPTUNE),
            ("pluto", BodyId::PLUTO),
            ("chiron", BodyId::CHIRON),
            ("selena", BodyId::SELENA),
            ("lilith", BodyId::LILITH),
            ("south_node", BodyId::SOUTH_NODE),
            ("north_node", BodyId::NORTH_NODE),
            ("proserpina", BodyId::PROSERPINA),
            ("vertex", BodyId::VERTEX),
            ("pars_fortuna", BodyId::PARS_FORTUNA),
            ("mercury_r", BodyId::MERCURY.retro()),
            ("venus_r", BodyId::VENUS.retro()),
            ("mars_r", BodyId::MARS.retro()),
            ("jupiter_r", BodyId::JUPITER.retro()),
            ("saturn_r", BodyId::SATURN.retro()),
            ("uranus_r", BodyId::URANUS.retro()),
            ("neptune_r", BodyId::NEPTUNE.retro()),
            ("pluto_r", BodyId::PLUTO.retro()),
            ("chiron_r", BodyId::CHIRON.retro()),
            ("proserpina_r", BodyId::PROSERPINA.retro()),
            ("asc", BodyId::ASC),
            ("ic", BodyId::IC),
            ("dsc", BodyId::DSC),
            ("mc", BodyId::MC),
        ];
        const HOUSE_NAMES: [&str; 12] = [
            "house_1", "house_2", "house_3", "house_4", "house_5", "house_6", "house_7", "house_8",
            "house_9", "house_10", "house_11", "house_12",
        ];
        for (house, name) in (1u8..=12).zip(HOUSE_NAMES) {
            names.push((name, BodyId::cusp(house)));
        }
        names
    };
}

/// Tag opening a natal line of a chart file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NatalTag {
    Birth,
    Sunrise,
    Sunset,
}

/// Resolves tokens to identifiers and identifiers back to display names.
///
/// Lookups are exact; aliases shadow canonical names.
#[derive(Debug, Clone)]
pub struct Registry {
    bodies: HashMap<String, BodyId>,
    body_names: HashMap<BodyId, String>,
    signs: HashMap<String, Sign>,
    sign_names: HashMap<Sign, String>,
    aspects: HashMap<String, Aspect>,
    natal_tags: HashMap<String, NatalTag>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self {
            bodies: HashMap::new(),
            body_names: HashMap::new(),
            signs: HashMap::new(),
            sign_names: HashMap::new(),
            aspects: HashMap::new(),
            natal_tags: HashMap::new(),
        };
        for (name, id) in CANONICAL_BODIES.iter() {
            registry.bodies.insert((*name).to_string(), *id);
            registry.body_names.entry(*id).or_insert_with(|| (*name).to_string());
        }
        for sign in Sign::ALL {
            registry.signs.insert(sign.name().to_string(), sign);
            registry.sign_names.insert(sign, sign.name().to_string());
        }
        for aspect in Aspect::DEFAULT_SET
            .into_iter()
            .chain([Aspect::SemiSquare, Aspect::Sesquiquadrate, Aspect::MidheavenProximity])
        {
            registry.aspects.insert(aspect.name().to_string(), aspect);
        }
        registry.natal_tags.insert("natal".to_string(), NatalTag::Birth);
        registry.natal_tags.insert("sunrise".to_string(), NatalTag::Sunrise);
        registry.natal_tags.insert("sunset".to_string(), NatalTag::Sunset);
        registry
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `alias` for a body; the alias becomes its display name.
    pub fn alias_body(&mut self, alias: &str, id: BodyId) {
        self.bodies.insert(alias.to_string(), id);
        self.body_names.insert(id, alias.to_string());
    }

    pub fn alias_sign(&mut self, alias: &str, sign: Sign) {
        self.signs.insert(alias.to_string(), sign);
        self.sign_names.insert(sign, alias.to_string());
    }

    pub fn alias_aspect(&mut self, alias: &str, aspect: Aspect) {
        self.aspects.insert(alias.to_string(), aspect);
    }

    pub fn alias_natal_tag(&mut self, alias: &str, tag: NatalTag) {
        self.natal_tags.insert(alias.to_string(), tag);
    }

    pub fn body(&self, token: &str) -> Option<BodyId> {
        self.bodies.get(token).copied()
    }

    pub fn sign(&self, token: &str) -> Option<Sign> {
        self.signs.get(token).copied()
    }

    pub fn aspect(&self, token: &str) -> Option<Aspect> {
        self.aspects.get(token).copied()
    }

    pub fn natal_tag(&self, token: &str) -> Option<NatalTag> {
        self.natal_tags.get(token).copied()
    }

    /// Display name of a body, falling back to its numeric form.
    pub fn body_name(&self, id: BodyId) -> String {
        self.body_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    pub fn sign_name(&self, sign: Sign) -> &str {
        self.sign_names
            .get(&sign)
            .map(String::as_str)
            .unwrap_or_else(|| sign.name())
    }
}
