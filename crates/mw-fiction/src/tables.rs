//! Word tables keyed by point-of-interest type or biome.

use mw_terrain::Biome;

pub(crate) type Table = &'static [(&'static str, &'static [&'static str])];
/// Templates paired with one choice list per `{}` slot.
pub(crate) type Templates = &'static [(&'static str, &'static [&'static [&'static str]])];

/// Entries for `key`, or `fallback` if the table has none.
pub(crate) fn lookup(table: Table, key: &str, fallback: &'static [&'static str]) -> &'static [&'static str] {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(fallback, |(_, words)| *words)
}

pub(crate) const NAME_PREFIXES: Table = &[
    ("settlement", &["Vale", "Haven", "Keep", "Watch", "Rest", "Ford"]),
    ("ruin", &["Elden", "Forgotten", "Ancient", "Lost", "Crumbled", "Fallen"]),
    ("temple", &["Sanctum", "Shrine", "Altar", "Monastery", "Abbey", "Cathedral"]),
    ("cave", &["Gloom", "Echo", "Whisper", "Dark", "Deep", "Hollow"]),
    ("fortress", &["Iron", "Stone", "Black", "White", "Eagle", "Wolf"]),
    ("mine", &["Deeprock", "Ironvein", "Gold", "Silver", "Crystal", "Ore"]),
];

pub(crate) const NAME_SUFFIXES: Table = &[
    ("settlement", &["wood", "brook", "field", "hill", "dale", "mere"]),
    ("ruin", &["tower", "hall", "citadel", "bastion", "spire", "keep"]),
    ("temple", &[" of Light", " of Shadows", " of the Moon", " of the Sun", " of Stars", " of Dawn"]),
    ("cave", &["delve", "pit", "maw", "abyss", "chasm", "depths"]),
    ("fortress", &["hold", "keep", "fort", "castle", "stronghold", "citadel"]),
    ("mine", &["pit", "shaft", "delve", "tunnel", "gallery", "works"]),
];

pub(crate) const DEFAULT_PREFIXES: &[&str] = &["Mystic"];
pub(crate) const DEFAULT_SUFFIXES: &[&str] = &["Place"];

/// Description template and the fill-in choices for its `{}` slot.
pub(crate) const DESCRIPTIONS: &[(&str, &str, &[&str])] = &[
    (
        "settlement",
        "{name} is a bustling settlement known for its {}.",
        &["friendly inhabitants", "vibrant market", "ancient traditions", "strategic location"],
    ),
    (
        "ruin",
        "The crumbling remains of {name} whisper tales of {}.",
        &["ancient glory", "forgotten magic", "lost knowledge", "past tragedies"],
    ),
    (
        "temple",
        "{name} stands as a sacred site where {}.",
        &["pilgrims gather", "mysteries unfold", "ancient rituals persist", "divine presence lingers"],
    ),
    (
        "cave",
        "Dark and foreboding, {name} hides {} within its depths.",
        &["untold treasures", "dangerous creatures", "ancient secrets", "forgotten pathways"],
    ),
    (
        "fortress",
        "{name} looms as an impregnable bastion, its walls bearing the scars of {}.",
        &["countless battles", "ancient sieges", "generations of defenders", "legendary conflicts"],
    ),
    (
        "mine",
        "Deep within {name}, miners toil to extract {} from the earth.",
        &["precious ores", "rare crystals", "ancient artifacts", "mystical minerals"],
    ),
];

pub(crate) const FIRST_NAMES: &[&str] = &[
    "Aelric", "Brianna", "Cedric", "Daria", "Eamon", "Fiona", "Garrick", "Hilda",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Ironwood", "Stormborn", "Frostveil", "Darkleaf", "Brightforge", "Shadowmere",
];

pub(crate) const ROLES: Table = &[
    ("settlement", &["Mayor", "Blacksmith", "Innkeeper", "Healer", "Guard", "Merchant"]),
    ("ruin", &["Ghost", "Scholar", "Adventurer", "Guardian", "Looter", "Historian"]),
    ("temple", &["High Priest", "Acolyte", "Paladin", "Seer", "Monk", "Confessor"]),
    ("cave", &["Explorer", "Miner", "Bandit", "Hermit", "Beast", "Treasure Hunter"]),
    ("fortress", &["Captain", "Soldier", "Armsmaster", "Scout", "Prisoner", "Spymaster"]),
    ("mine", &["Foreman", "Miner", "Assayer", "Engineer", "Convict", "Prospector"]),
];

pub(crate) const DEFAULT_ROLES: &[&str] = &["Mysterious Figure"];

pub(crate) const TRAITS: Table = &[
    ("settlement", &["welcoming", "hardworking", "wise", "cunning", "generous", "suspicious"]),
    ("ruin", &["haunted", "knowledgeable", "brave", "greedy", "cursed", "obsessed"]),
    ("temple", &["devout", "mysterious", "peaceful", "fanatical", "enlightened", "ascetic"]),
    ("cave", &["tough", "resourceful", "paranoid", "ruthless", "lonely", "determined"]),
    ("fortress", &["disciplined", "vigilant", "loyal", "brutal", "strategic", "honorable"]),
    ("mine", &["strong", "practical", "greedy", "skilled", "weary", "ambitious"]),
];

pub(crate) const DEFAULT_TRAITS: &[&str] = &["mysterious"];

pub(crate) const FEATURES: &[&str] = &[
    "piercing eyes",
    "a scarred face",
    "an air of authority",
    "a quiet demeanor",
];

/// Rumor templates. `{name}` is the POI name; each `{}` is filled from the
/// matching choice list in order.
pub(crate) const RUMORS: &[(&str, Templates)] = &[
    (
        "settlement",
        &[
            (
                "They say {name} was built on {}.",
                &[&["ancient ruins", "a buried treasure", "a sacred site", "a dragon's hoard"]],
            ),
            (
                "The {} of {name} is said to be {}.",
                &[
                    &["mayor", "blacksmith", "innkeeper"],
                    &["a spy", "a wizard", "a vampire", "a saint"],
                ],
            ),
            (
                "Travelers whisper that {name} hides {}.",
                &[&["a secret tunnel", "a magical artifact", "a cursed relic", "a portal to another world"]],
            ),
        ],
    ),
    (
        "ruin",
        &[
            (
                "{name} is haunted by the ghost of {}.",
                &[&["a betrayed king", "a murdered priestess", "a fallen warrior", "a heartbroken lover"]],
            ),
            (
                "They say {name} was destroyed by {}.",
                &[&["a dragon", "a curse", "an ancient weapon", "divine wrath"]],
            ),
            (
                "At midnight, the ruins of {name} {}.",
                &[&["glow with eerie light", "echo with ghostly voices", "reveal hidden passages", "come alive with shadows"]],
            ),
        ],
    ),
    (
        "temple",
        &[
            (
                "{name} is said to grant {} to those who {}.",
                &[
                    &["visions", "healing", "curses", "blessings"],
                    &["pray sincerely", "offer sacrifices", "solve its riddles", "pass its trials"],
                ],
            ),
            (
                "The priests of {name} guard {}.",
                &[&["a relic of the first gods", "a sealed crypt", "a book no one may read", "a bell that rings on its own"]],
            ),
        ],
    ),
    (
        "cave",
        &[
            (
                "Something {} lives in the deepest part of {name}.",
                &[&["enormous", "hungry", "very old", "that speaks"]],
            ),
            (
                "Miners who entered {name} came back {}.",
                &[&["rich", "mad", "years older", "missing their shadows"]],
            ),
        ],
    ),
    (
        "fortress",
        &[
            (
                "The walls of {name} have never fallen to {}.",
                &[&["siege", "fire", "treachery", "sorcery"]],
            ),
            (
                "The commander of {name} secretly serves {}.",
                &[&["a rival crown", "a dead king", "a dragon", "the thieves' guild"]],
            ),
        ],
    ),
    (
        "mine",
        &[
            (
                "The lowest shaft of {name} broke into {}.",
                &[&["an older tunnel", "a sunless lake", "a sealed vault", "something's nest"]],
            ),
            (
                "Ore from {name} is said to be {}.",
                &[&["cursed", "faintly warm", "worth triple its weight", "whispering"]],
            ),
        ],
    ),
];

pub(crate) const DEFAULT_RUMOR: &str = "Strange things are said to happen near {name}.";

pub(crate) const SECRETS: Table = &[
    ("settlement", &[
        "The town's founder made a pact that comes due this generation.",
        "A smuggling ring runs through the cellars beneath the market.",
        "The well water keeps the elders unnaturally young.",
    ]),
    ("ruin", &[
        "A sealed vault below still holds the old court's treasury.",
        "The ruin was never abandoned; its people went underground.",
        "The collapse was deliberate, to bury what was kept inside.",
    ]),
    ("temple", &[
        "The god worshipped here died long ago; the priests hide it.",
        "A hidden stair behind the altar leads to a second, older shrine.",
        "The high priest is an impostor who replaced the original.",
    ]),
    ("cave", &[
        "The cave connects to a tunnel network spanning the continent.",
        "A dragon sleeps beneath the lowest chamber.",
        "The echoes are a language, and something answers.",
    ]),
    ("fortress", &[
        "A forgotten postern gate opens from the outside.",
        "The garrison has not been paid in a year and is close to mutiny.",
        "The lord of the fortress is held prisoner in its own dungeon.",
    ]),
    ("mine", &[
        "The miners broke into a tomb and told no one.",
        "The ore veins are growing back.",
        "The owners are salting the mine to inflate its value.",
    ]),
];

pub(crate) const DEFAULT_SECRETS: &[&str] = &[
    "Nothing here is quite what it seems.",
    "Someone nearby knows more than they let on.",
];

pub(crate) const LORE_TITLES: Table = &[
    ("creation_myth", &[
        "The Shaping of the World",
        "How the Land Rose from the Sea",
        "The First Dawn",
    ]),
    ("historical_event", &[
        "The Sundering",
        "The War of Broken Crowns",
        "The Long Winter",
    ]),
    ("legend", &[
        "The Wanderer's Lantern",
        "The King Beneath the Hill",
        "The Song of the Drowned Bell",
    ]),
];

pub(crate) const DEFAULT_LORE_TITLES: &[&str] = &["An Old Tale", "A Forgotten Story"];

pub(crate) const AGES: &[&str] = &[
    "First Age",
    "Second Age",
    "Third Age",
    "Age of Embers",
    "Age of Tides",
    "Age of Iron",
];

/// Opening clause for a region description.
pub(crate) fn biome_scenes(biome: Biome) -> &'static [&'static str] {
    match biome {
        Biome::Ocean => &[
            "open water stretches to the horizon",
            "grey swells roll beneath a wide sky",
        ],
        Biome::Beach => &[
            "pale sand meets the restless surf",
            "dunes and driftwood line the shore",
        ],
        Biome::Swamp => &[
            "black water pools between twisted roots",
            "mist hangs over reeds and sucking mud",
        ],
        Biome::Forest => &[
            "tall trees crowd close under a green canopy",
            "old oaks and ferns hide narrow game trails",
        ],
        Biome::Jungle => &[
            "vines and broad leaves choke the humid air",
            "a riot of green hums with unseen life",
        ],
        Biome::Grassland => &[
            "grass ripples in the wind for miles",
            "wildflowers dot gentle, open meadows",
        ],
        Biome::Plains => &[
            "flat plains run unbroken to the sky",
            "a wide and level country lies open to the weather",
        ],
        Biome::Desert => &[
            "sun-baked sand shimmers in the heat",
            "cracked earth and bare stone stretch away",
        ],
        Biome::Hills => &[
            "rolling hills fold one into another",
            "heather and stone cap the low rises",
        ],
        Biome::Mountain => &[
            "sheer rock climbs toward jagged peaks",
            "switchback paths cling to steep slopes",
        ],
        Biome::Snow => &[
            "snowfields glare white under a cold sun",
            "ice and drifting snow bury every path",
        ],
        Biome::Tundra => &[
            "frozen moss spreads across the barren ground",
            "a bitter wind scours the treeless flats",
        ],
    }
}

pub(crate) const DRAMATIC_CLOSERS: &[&str] = &[
    "Few who travel here return unchanged.",
    "The land itself seems to be watching.",
    "Old powers stir beneath the surface.",
];
