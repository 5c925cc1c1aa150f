//! Built-in country and label tables.
//!
//! Every code in [`COUNTRIES`] carries a name for each of the built-in
//! locales, so a resolved code can always be displayed.

/// Built-in locales, in the column order of [`COUNTRIES`].
pub const LOCALES: [&str; 3] = ["en", "es", "fr"];

/// `(code, en, es, fr)`. The English name doubles as the primary alias.
pub const COUNTRIES: &[(&str, &str, &str, &str)] = &[
    ("AF", "Afghanistan", "Afganistán", "Afghanistan"),
    ("AR", "Argentina", "Argentina", "Argentine"),
    ("AU", "Australia", "Australia", "Australie"),
    ("BO", "Bolivia", "Bolivia", "Bolivie"),
    ("CA", "Canada", "Canadá", "Canada"),
    ("CL", "Chile", "Chile", "Chili"),
    ("CN", "China", "China", "Chine"),
    ("CO", "Colombia", "Colombia", "Colombie"),
    ("CR", "Costa Rica", "Costa Rica", "Costa Rica"),
    ("CU", "Cuba", "Cuba", "Cuba"),
    ("DO", "Dominican Republic", "República Dominicana", "République dominicaine"),
    ("EC", "Ecuador", "Ecuador", "Équateur"),
    ("FJ", "Fiji", "Fiyi", "Fidji"),
    ("GR", "Greece", "Grecia", "Grèce"),
    ("GT", "Guatemala", "Guatemala", "Guatemala"),
    ("GU", "Guam", "Guam", "Guam"),
    ("HT", "Haiti", "Haití", "Haïti"),
    ("ID", "Indonesia", "Indonesia", "Indonésie"),
    ("IN", "India", "India", "Inde"),
    ("IR", "Iran", "Irán", "Iran"),
    ("IS", "Iceland", "Islandia", "Islande"),
    ("IT", "Italy", "Italia", "Italie"),
    ("JM", "Jamaica", "Jamaica", "Jamaïque"),
    ("JP", "Japan", "Japón", "Japon"),
    ("KG", "Kyrgyzstan", "Kirguistán", "Kirghizistan"),
    ("KZ", "Kazakhstan", "Kazajistán", "Kazakhstan"),
    ("MM", "Myanmar", "Myanmar", "Myanmar"),
    ("MP", "Northern Mariana Islands", "Islas Marianas del Norte", "Îles Mariannes du Nord"),
    ("MX", "Mexico", "México", "Mexique"),
    ("NI", "Nicaragua", "Nicaragua", "Nicaragua"),
    ("NP", "Nepal", "Nepal", "Népal"),
    ("NZ", "New Zealand", "Nueva Zelanda", "Nouvelle-Zélande"),
    ("PA", "Panama", "Panamá", "Panama"),
    ("PE", "Peru", "Perú", "Pérou"),
    ("PG", "Papua New Guinea", "Papúa Nueva Guinea", "Papouasie-Nouvelle-Guinée"),
    ("PH", "Philippines", "Filipinas", "Philippines"),
    ("PK", "Pakistan", "Pakistán", "Pakistan"),
    ("PR", "Puerto Rico", "Puerto Rico", "Porto Rico"),
    ("RO", "Romania", "Rumania", "Roumanie"),
    ("RU", "Russia", "Rusia", "Russie"),
    ("SB", "Solomon Islands", "Islas Salomón", "Îles Salomon"),
    ("SV", "El Salvador", "El Salvador", "Salvador"),
    ("TJ", "Tajikistan", "Tayikistán", "Tadjikistan"),
    ("TO", "Tonga", "Tonga", "Tonga"),
    ("TR", "Turkey", "Turquía", "Turquie"),
    ("TW", "Taiwan", "Taiwán", "Taïwan"),
    ("US", "United States", "Estados Unidos", "États-Unis"),
    ("VE", "Venezuela", "Venezuela", "Venezuela"),
    ("VI", "U.S. Virgin Islands", "Islas Vírgenes de los Estados Unidos", "Îles Vierges des États-Unis"),
    ("VU", "Vanuatu", "Vanuatu", "Vanuatu"),
];

/// Extra English aliases seen as locality tails in USGS place strings.
pub const ALIASES: &[(&str, &str)] = &[
    ("USA", "US"),
    ("United States of America", "US"),
    ("Alaska", "US"),
    ("AK", "US"),
    ("California", "US"),
    ("CA", "US"),
    ("Hawaii", "US"),
    ("HI", "US"),
    ("Nevada", "US"),
    ("NV", "US"),
    ("Washington", "US"),
    ("Oregon", "US"),
    ("Idaho", "US"),
    ("Montana", "US"),
    ("Wyoming", "US"),
    ("Utah", "US"),
    ("Colorado", "US"),
    ("Arizona", "US"),
    ("New Mexico", "US"),
    ("Texas", "US"),
    ("Oklahoma", "US"),
    ("Kansas", "US"),
    ("Arkansas", "US"),
    ("Missouri", "US"),
    ("Tennessee", "US"),
    ("Kentucky", "US"),
    ("South Carolina", "US"),
    ("Virginia", "US"),
    ("New York", "US"),
    ("Maine", "US"),
    ("MX", "MX"),
    ("Türkiye", "TR"),
    ("Burma", "MM"),
    ("Russian Federation", "RU"),
];

pub const LABELS_EN: &[(&str, &str)] = &[
    ("app.title", "Earthquake Explorer"),
    ("window.daily", "Past day"),
    ("window.weekly", "Past week"),
    ("filter.all", "All magnitudes"),
    ("filter.minor", "Below 3"),
    ("filter.light", "3 to 5"),
    ("filter.strong", "5 to 7"),
    ("filter.major", "7 and above"),
    ("column.place", "Place"),
    ("column.magnitude", "Magnitude"),
    ("column.time", "Time"),
    ("column.country", "Country"),
    ("search.placeholder", "Search by place"),
    ("action.load_more", "Load more"),
    ("message.loading", "Loading earthquakes..."),
    ("message.no_data", "No earthquakes reported for this period."),
    ("message.fetch_failed", "Could not load the earthquake feed"),
];

pub const LABELS_ES: &[(&str, &str)] = &[
    ("app.title", "Explorador de sismos"),
    ("window.daily", "Último día"),
    ("window.weekly", "Última semana"),
    ("filter.all", "Todas las magnitudes"),
    ("filter.minor", "Menor de 3"),
    ("filter.light", "De 3 a 5"),
    ("filter.strong", "De 5 a 7"),
    ("filter.major", "7 o más"),
    ("column.place", "Lugar"),
    ("column.magnitude", "Magnitud"),
    ("column.time", "Hora"),
    ("column.country", "País"),
    ("search.placeholder", "Buscar por lugar"),
    ("action.load_more", "Cargar más"),
    ("message.loading", "Cargando sismos..."),
    ("message.no_data", "No hay sismos registrados en este periodo."),
    ("message.fetch_failed", "No se pudo cargar el feed de sismos"),
];

pub const LABELS_FR: &[(&str, &str)] = &[
    ("app.title", "Explorateur de séismes"),
    ("window.daily", "Dernier jour"),
    ("window.weekly", "Dernière semaine"),
    ("filter.all", "Toutes magnitudes"),
    ("filter.minor", "Moins de 3"),
    ("filter.light", "De 3 à 5"),
    ("filter.strong", "De 5 à 7"),
    ("filter.major", "7 et plus"),
    ("column.place", "Lieu"),
    ("column.magnitude", "Magnitude"),
    ("column.time", "Heure"),
    ("column.country", "Pays"),
    ("search.placeholder", "Rechercher un lieu"),
    ("action.load_more", "Charger plus"),
    ("message.loading", "Chargement des séismes..."),
    ("message.no_data", "Aucun séisme signalé pour cette période."),
    ("message.fetch_failed", "Impossible de charger le flux de séismes"),
];
