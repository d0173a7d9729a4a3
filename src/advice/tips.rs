use serde::{Deserialize, Serialize};

/// Condition keys the advice tables and specialist map are indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Diabetes,
    Heart,
    Parkinsons,
    Lungs,
    Thyroid,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Diabetes,
        Condition::Heart,
        Condition::Parkinsons,
        Condition::Lungs,
        Condition::Thyroid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Heart => "heart",
            Self::Parkinsons => "parkinsons",
            Self::Lungs => "lungs",
            Self::Thyroid => "thyroid",
        }
    }

    /// Label used by the Consult Doctor disease picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Heart => "Heart Disease",
            Self::Parkinsons => "Parkinson's",
            Self::Lungs => "Lung Cancer",
            Self::Thyroid => "Hypo-Thyroid",
        }
    }

    pub fn tips(&self) -> &'static HealthTips {
        match self {
            Self::Diabetes => &DIABETES,
            Self::Heart => &HEART,
            Self::Parkinsons => &PARKINSONS,
            Self::Lungs => &LUNGS,
            Self::Thyroid => &THYROID,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    /// Accepts condition keys and picker labels, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(wanted)
                    || c.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown condition: {s}"))
    }
}

/// Static guidance for one condition.
#[derive(Debug, Serialize)]
pub struct HealthTips {
    pub precautions: &'static [&'static str],
    pub diet: &'static [&'static str],
    pub avoid: &'static [&'static str],
    pub yoga_asanas: &'static [&'static str],
    pub home_remedies_daily: &'static [&'static str],
    pub home_remedies_emergency: &'static [&'static str],
    pub medication_emergency: &'static [&'static str],
    pub emergency_precautions: &'static [&'static str],
    pub medication_precautions: &'static [&'static str],
}

impl HealthTips {
    /// Sections in display order, with their headings.
    pub fn sections(&self) -> [(&'static str, &'static [&'static str]); 9] {
        [
            ("Yoga Asanas (Recommended)", self.yoga_asanas),
            ("Precautions to Follow", self.precautions),
            ("Recommended Diet", self.diet),
            ("Foods to Avoid", self.avoid),
            ("Daily Home Remedies", self.home_remedies_daily),
            ("Emergency Home Remedies", self.home_remedies_emergency),
            ("Emergency Medicines (For Knowledge Only)", self.medication_emergency),
            ("Emergency Precautions", self.emergency_precautions),
            ("Medication & Treatment Precautions", self.medication_precautions),
        ]
    }
}

/// Tips by condition key or picker label; `None` when nothing matches.
pub fn tips_for(name: &str) -> Option<&'static HealthTips> {
    name.parse::<Condition>().ok().map(|c| c.tips())
}

static DIABETES: HealthTips = HealthTips {
    precautions: &[
        "Monitor blood sugar regularly.",
        "Maintain a healthy weight.",
        "Eat a balanced diet rich in whole grains, fruits, and vegetables.",
        "Exercise at least 30 minutes daily.",
        "Take prescribed medications on time.",
    ],
    diet: &[
        "Whole grains.",
        "Nuts and seeds.",
        "Leafy vegetables.",
        "Lentils and pulses.",
        "High-fiber fruits like apples, guava, papaya.",
        "Low-fat dairy and lean proteins.",
    ],
    avoid: &[
        "Sugary foods.",
        "White bread.",
        "Processed snacks.",
        "Sweetened beverages.",
        "Deep-fried foods and excessive white rice.",
    ],
    yoga_asanas: &[
        "Dhanurasana (Bow Pose)",
        "Ardha Matsyendrasana (Half Spinal Twist)",
        "Paschimottanasana (Seated Forward Bend)",
        "Kapalabhati Pranayama",
        "Surya Namaskar (Sun Salutation)",
    ],
    home_remedies_daily: &[
        "Bitter gourd (Karela) juice: helps reduce blood sugar.",
        "Fenugreek (Methi) seeds soaked overnight: improves insulin sensitivity.",
        "Amla (Indian gooseberry): rich in vitamin C, supports pancreas function.",
        "Cinnamon (Dalchini): may lower fasting blood sugar.",
        "Drink plenty of water to help flush out excess sugar.",
    ],
    home_remedies_emergency: &[
        "If blood sugar is LOW (hypoglycemia): give 1 tbsp sugar or honey instantly.",
        "Offer glucose water or fruit juice if the person is awake.",
        "Raisins or banana help raise sugar naturally.",
        "Keep the patient seated or lying safely until recovery.",
        "If blood sugar is HIGH (hyperglycemia): drink plenty of water to flush sugar.",
        "Avoid sweets, walk lightly if able, and monitor sugar if possible.",
    ],
    medication_emergency: &[
        "Glucose (Dextrose) orally or IV for low sugar.",
        "Glucagon injection if unconscious.",
        "Short-acting IV insulin and IV normal saline for high sugar (hospital).",
        "Potassium correction under monitoring.",
    ],
    emergency_precautions: &[
        "If blood sugar < 70 mg/dL: take fast-acting sugar immediately.",
        "If blood sugar > 300 mg/dL with nausea, vomiting or dizziness, seek emergency care.",
        "Keep a glucose source (tablet/juice) and an emergency contact handy.",
    ],
    medication_precautions: &[
        "Never skip or double doses without doctor advice.",
        "Take insulin/antidiabetic medicines as prescribed and follow timing.",
        "Store insulin as instructed and check injection technique.",
    ],
};

static HEART: HealthTips = HealthTips {
    precautions: &[
        "Avoid smoking and limit alcohol.",
        "Maintain a healthy weight.",
        "Manage stress effectively.",
        "Keep blood pressure and cholesterol under control.",
        "Perform regular light-to-moderate physical activity.",
    ],
    diet: &[
        "Oats.",
        "Whole grains.",
        "Nuts.",
        "Olive oil.",
        "Green vegetables and legumes.",
        "Omega-3 rich fish like salmon or sardines.",
    ],
    avoid: &[
        "Deep-fried foods.",
        "Excessive red meat.",
        "High salt and sugary foods.",
        "Excessive caffeine or energy drinks.",
    ],
    yoga_asanas: &[
        "Tadasana (Mountain Pose)",
        "Vrikshasana (Tree Pose)",
        "Setu Bandhasana (Bridge Pose)",
        "Anulom Vilom (Alternate Nostril Breathing)",
        "Shavasana (Corpse Pose)",
    ],
    home_remedies_daily: &[
        "Garlic: helps lower cholesterol.",
        "Flax seeds: rich in omega-3 fatty acids.",
        "Green tea: antioxidant and heart-friendly.",
        "Oats and whole grains: reduce bad cholesterol.",
        "Avoid excess salt and trans fats.",
    ],
    home_remedies_emergency: &[
        "Sit upright and stay calm to reduce strain on the heart.",
        "Chew 1 aspirin (300 mg) if not allergic.",
        "Place 1 Sorbitrate / Nitroglycerin tablet under the tongue (if prescribed).",
        "Loosen tight clothing, allow fresh air, avoid lying flat, call emergency help.",
    ],
    medication_emergency: &[
        "Aspirin 300 mg chewable.",
        "Nitroglycerin (Sorbitrate / Nitrostat) sublingual tablet.",
        "Clopidogrel (Plavix) as advised.",
        "Oxygen therapy if saturation is low.",
        "Morphine for pain relief (hospital).",
        "Adrenaline / Atropine in cardiac arrest (hospital use).",
    ],
    emergency_precautions: &[
        "If severe chest pain, shortness of breath, or fainting occurs, call emergency services immediately.",
        "If advised and not allergic, chew aspirin while awaiting help.",
        "Avoid heavy exertion or emotional stress.",
    ],
    medication_precautions: &[
        "Take BP and cardiac medicines regularly at prescribed times.",
        "Do not stop anti-hypertensive or anticoagulant therapy suddenly without a doctor's guidance.",
        "Inform your doctor about all supplements to avoid interactions.",
    ],
};

static PARKINSONS: HealthTips = HealthTips {
    precautions: &[
        "Adhere to the medication schedule strictly.",
        "Do daily stretching and balance exercises.",
        "Practice deep breathing and relaxation techniques.",
        "Keep the home safe to prevent falls (remove tripping hazards).",
    ],
    diet: &[
        "Foods rich in antioxidants (berries, green leafy vegetables).",
        "Omega-3 fatty acids (fatty fish, flaxseeds).",
        "Adequate protein and fiber intake.",
        "Small frequent meals if swallowing is affected.",
    ],
    avoid: &[
        "High-fat fried foods.",
        "Excessive processed foods.",
        "Skipping medications or changing doses without advice.",
        "Alcohol and sedatives that worsen symptoms.",
    ],
    yoga_asanas: &[
        "Tadasana (Mountain Pose)",
        "Virabhadrasana (Warrior Pose)",
        "Vrikshasana (Tree Pose)",
        "Nadi Shodhana (Alternate Nostril Breathing)",
        "Shavasana (Relaxation Pose)",
    ],
    home_remedies_daily: &[
        "Turmeric (Curcumin): anti-inflammatory and antioxidant.",
        "Walnuts and almonds: support brain health.",
        "Green vegetables and berries: rich in antioxidants.",
        "Ginger tea: may slightly reduce stiffness and tremors.",
        "Vitamin D from sunlight or diet (mushrooms, milk).",
    ],
    home_remedies_emergency: &[
        "Stay calm and take deep breaths.",
        "Massage stiff muscles gently with warm oil.",
        "Take a missed Levodopa dose immediately if due.",
        "Warm bath or moist towel on muscles to relax stiffness.",
        "Maintain a balanced posture to avoid falls.",
    ],
    medication_emergency: &[
        "Levodopa + Carbidopa (Syndopa / Sinemet).",
        "Amantadine for sudden freezing episodes.",
        "Apomorphine injection for severe 'off' episodes (hospital use).",
    ],
    emergency_precautions: &[
        "On sudden loss of balance or fainting, sit or lie down immediately.",
        "Avoid moving alone outdoors; keep assistance ready.",
        "Report sudden severe stiffness, slurred speech, or confusion immediately.",
    ],
    medication_precautions: &[
        "Take Levodopa and related medicines at the same time daily.",
        "Avoid high-protein meals right around Levodopa dosing.",
        "Do not abruptly stop Parkinson's medications without medical advice.",
        "Consult the prescriber before any change.",
    ],
};

static LUNGS: HealthTips = HealthTips {
    precautions: &[
        "Quit smoking and avoid second-hand smoke.",
        "Avoid polluted environments when possible.",
        "Keep up with vaccinations (influenza, pneumococcal) as advised.",
    ],
    diet: &[
        "Protein-rich foods to maintain strength.",
        "Whole grains, legumes, and green leafy vegetables.",
        "Fruits high in vitamin C and antioxidants.",
        "Hydration and small frequent nutritious meals if breathless.",
    ],
    avoid: &[
        "Processed meats.",
        "Excessive alcohol.",
        "Burnt foods.",
        "Exposure to smoke.",
        "Industrial fumes.",
        "Strong chemicals.",
    ],
    yoga_asanas: &[
        "Bhujangasana (Cobra Pose)",
        "Anulom Vilom (Alternate Nostril Breathing)",
        "Bhastrika Pranayama (Bellows Breath)",
        "Matsyasana (Fish Pose)",
        "Ardha Chakrasana (Half Wheel Pose)",
    ],
    home_remedies_daily: &[
        "Ginger tea: relieves nausea and inflammation.",
        "Tulsi (Holy Basil): supports respiratory health.",
        "Turmeric milk: reduces inflammation.",
        "Steam inhalation with eucalyptus oil: clears airways.",
        "Green leafy vegetables and fruits: antioxidants for cell protection.",
    ],
    home_remedies_emergency: &[
        "Sit upright or lean slightly forward; never lie flat.",
        "Use a fan or open a window for fresh air.",
        "Sip warm water to soothe the airways.",
        "Steam inhalation with eucalyptus oil to clear mucus.",
        "Avoid smoke or incense; if coughing blood or in severe pain, seek emergency help.",
    ],
    medication_emergency: &[
        "Oxygen therapy for breathlessness.",
        "Low-dose Morphine for pain (under doctor supervision).",
        "Bronchodilators (Salbutamol / Ipratropium).",
        "Broad-spectrum antibiotics if infection.",
        "Steroids (Dexamethasone) to reduce swelling.",
    ],
    emergency_precautions: &[
        "Severe breathlessness, bluish lips or fingertips, or sudden chest pain: call emergency services immediately.",
        "Use a rescue inhaler/nebulizer promptly if prescribed and trained by a clinician.",
    ],
    medication_precautions: &[
        "Carry an inhaler or nebulizer and know how to use it.",
        "Rinse the mouth after steroid inhalers.",
        "Do not stop corticosteroids or long-term inhalers abruptly without medical advice.",
    ],
};

static THYROID: HealthTips = HealthTips {
    precautions: &[
        "Take thyroid medication on an empty stomach as prescribed.",
        "Regularly monitor TSH/T3/T4 levels as advised.",
        "Avoid excessive raw goitrogenic foods.",
        "Manage stress and maintain healthy sleep patterns.",
    ],
    diet: &[
        "Selenium-rich foods (eggs, tuna, sunflower seeds).",
        "Moderate iodine sources (iodized salt, dairy).",
        "Antioxidant-rich foods (berries, nuts, green tea).",
        "Omega-3 fatty acids (fatty fish, flaxseeds).",
        "Balanced diet with whole grains, lean protein and vegetables.",
    ],
    avoid: &[
        "Large amounts of soy.",
        "Raw cruciferous vegetables (cabbage, broccoli) if advised to limit.",
        "Excessive iodine (supplements, salt) if not needed.",
        "Excessive caffeine and processed sugary foods.",
    ],
    yoga_asanas: &[
        "Sarvangasana (Shoulder Stand), only if safe for the patient",
        "Matsyasana (Fish Pose)",
        "Halasana (Plow Pose)",
        "Bhujangasana (Cobra Pose)",
        "Ujjayi Pranayama (Victorious Breath)",
    ],
    home_remedies_daily: &[
        "Coconut oil: supports thyroid function.",
        "Iodine-rich foods like seaweed, eggs and dairy (if needed).",
        "Ginger and turmeric: anti-inflammatory.",
        "Stay hydrated and maintain a high-fiber diet.",
    ],
    home_remedies_emergency: &[
        "Drink warm water with honey and lemon for mild energy.",
        "Eat iodine-rich foods (milk, eggs, iodized salt) if allowed.",
        "Keep the body warm with blankets.",
        "Take thyroid medicine (Levothyroxine) on time daily.",
        "Avoid lying down immediately after taking the pill.",
    ],
    medication_emergency: &[
        "IV Levothyroxine (for myxedema coma, hospital use).",
        "Hydrocortisone injection for adrenal support.",
        "IV normal saline to maintain BP/hydration.",
        "Oxygen therapy and warming blankets for low body temperature.",
    ],
    emergency_precautions: &[
        "Sudden severe fatigue, chest pain, fainting or irregular heartbeat: seek emergency help.",
        "Signs of an extreme hypo- or hyperthyroid state (confusion, high fever, dehydration) need urgent care.",
    ],
    medication_precautions: &[
        "Take Levothyroxine early in the morning on an empty stomach.",
        "Avoid iron/calcium within 4 hours of the dose.",
        "Do not switch brands without consulting a doctor.",
        "Check levels after any change.",
    ],
};
