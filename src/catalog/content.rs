//! Built-in educational content.
//!
//! Content text is Spanish only; card labels are localized at render time.

use once_cell::sync::Lazy;

use super::model::{Concept, ConceptField::*, Topic};

/// The four built-in topics, constructed on first use
pub static BUILTIN_TOPICS: Lazy<Vec<Topic>> = Lazy::new(|| {
    vec![
        technical_analysis(),
        risk_management(),
        trading_psychology(),
        market_terms(),
    ]
});

fn topic(title: &str, icon: &str, accent_color: &str, badge: &str, intro: &str, concepts: Vec<Concept>) -> Topic {
    Topic {
        title: title.to_string(),
        icon: icon.to_string(),
        accent_color: accent_color.to_string(),
        badge: badge.to_string(),
        intro: intro.to_string(),
        concepts,
    }
}

fn technical_analysis() -> Topic {
    topic(
        "Análisis Técnico",
        "fas fa-chart-line",
        "#2196F3",
        "📊",
        "El análisis técnico estudia el comportamiento del precio para predecir movimientos futuros.",
        vec![
            Concept::new(
                "RSI (Índice de Fuerza Relativa)",
                "fas fa-tachometer-alt",
                "#FF5722",
                "Mide la velocidad y magnitud de los cambios recientes de precio.",
                "oscilador",
            )
            .with(Range, "0 a 100")
            .with(Signals, ">70 = sobrecompra; <30 = sobreventa")
            .with(Formula, "RSI = 100 − (100 / (1 + RS)), donde RS = promedio ganancias / pérdidas (14 períodos)")
            .with(Example, "Un RSI de 28 sugiere que el activo podría rebotar.")
            .with(CommonError, "Usarlo en mercados laterales sin confirmación."),
            Concept::new(
                "Soporte y Resistencia",
                "fas fa-layer-group",
                "#4CAF50",
                "Niveles de precio donde históricamente se ha detenido una caída (soporte) o un alza (resistencia).",
                "nivel",
            )
            .with(Example, "BTC ha rebotado 3 veces en $40,000 → soporte fuerte.")
            .with(CommonError, "Asumir que siempre se respetan; pueden romperse con volumen."),
            Concept::new(
                "Volumen",
                "fas fa-chart-bar",
                "#00BCD4",
                "Cantidad de activos negociados en un período.",
                "confirmacion",
            )
            .with(Example, "Un breakout sin volumen suele ser falso.")
            .with(CommonError, "Ignorar el volumen al tomar decisiones."),
            Concept::new(
                "Bollinger Bands",
                "fas fa-wave-square",
                "#9C27B0",
                "Bandas superior e inferior basadas en desviación estándar del precio.",
                "volatilidad",
            )
            .with(Signals, "Precio cerca de banda superior = sobrecompra; banda inferior = sobreventa")
            .with(Example, "El precio tocó la banda inferior y rebotó → posible compra.")
            .with(CommonError, "Operar contra la tendencia solo por tocar una banda."),
            Concept::new(
                "MACD",
                "fas fa-chart-area",
                "#FFC107",
                "Indicador de impulso basado en medias móviles.",
                "impulso",
            )
            .with(Signals, "Cruce de la línea MACD con la señal → cambio de tendencia")
            .with(Example, "Cruce alcista en MACD precedió una subida del 10%.")
            .with(CommonError, "Usarlo en mercados sin tendencia clara."),
        ],
    )
}

fn risk_management() -> Topic {
    topic(
        "Gestión de Riesgo",
        "fas fa-shield-alt",
        "#4CAF50",
        "🛡️",
        "Protege tu capital y evita pérdidas innecesarias.",
        vec![
            Concept::new(
                "Stop Loss",
                "fas fa-stop-circle",
                "#F44336",
                "Orden para limitar pérdidas si el precio va en contra.",
                "proteccion",
            )
            .with(Formula, "Stop = Precio de entrada − Riesgo máximo aceptado")
            .with(Example, "Compraste en $42,000, stop en $41,000 → riesgo de $1,000.")
            .with(CommonError, "Colocarlo demasiado ajustado y ser sacado por ruido."),
            Concept::new(
                "Take Profit",
                "fas fa-bullseye",
                "#4CAF50",
                "Orden para cerrar ganancias al alcanzar un objetivo.",
                "objetivo",
            )
            .with(Example, "Take profit en $45,000 tras comprar en $42,000 → +7%.")
            .with(CommonError, "No usarlo y perder ganancias por volatilidad."),
            Concept::new(
                "Riesgo por Trade",
                "fas fa-percentage",
                "#FF9800",
                "Porcentaje del capital que se arriesga en una operación.",
                "regla",
            )
            .with(Rule, "Nunca más del 1-2% por trade.")
            .with(Example, "Con $10,000, riesgo máximo = $100–$200 por operación.")
            .with(CommonError, "Arriesgar más del 5% → alto riesgo de ruina."),
            Concept::new(
                "Drawdown",
                "fas fa-chart-line-down",
                "#9C27B0",
                "Caída máxima desde un pico de capital hasta un mínimo posterior.",
                "analisis",
            )
            .with(Example, "Tu drawdown fue del 15% en enero → revisa tu estrategia.")
            .with(CommonError, "Ignorarlo hasta que es demasiado tarde."),
            Concept::new(
                "Apalancamiento",
                "fas fa-weight-hanging",
                "#00BCD4",
                "Usar capital prestado para aumentar exposición.",
                "riesgo",
            )
            .with(Example, "10x en BTC: +10% → +100%; −10% → −100% (liquidación).")
            .with(CommonError, "Usar apalancamiento alto sin stop loss."),
        ],
    )
}

fn trading_psychology() -> Topic {
    topic(
        "Psicología del Trading",
        "fas fa-brain",
        "#9C27B0",
        "🧠",
        "Controlar tus emociones es tan importante como tener una buena estrategia.",
        vec![
            Concept::new(
                "FOMO (Fear Of Missing Out)",
                "fas fa-fire",
                "#FF5722",
                "Miedo a perderse una ganancia, lleva a entrar sin plan.",
                "emocion",
            )
            .with(Example, "Comprar tras una subida del 20% en 1 hora → FOMO.")
            .with(Solution, "Esperar pullback o confirmación técnica."),
            Concept::new(
                "FUD (Fear, Uncertainty, Doubt)",
                "fas fa-newspaper",
                "#607D8B",
                "Miedo generado por noticias negativas o rumores.",
                "emocion",
            )
            .with(Example, "Vender en pánico por un tweet → FUD.")
            .with(Solution, "Analizar si la noticia afecta fundamentalmente al activo."),
            Concept::new(
                "Overtrading",
                "fas fa-sync-alt",
                "#FFC107",
                "Abrir demasiadas operaciones por ansiedad o aburrimiento.",
                "comportamiento",
            )
            .with(Consequence, "Altas comisiones, fatiga, malas decisiones.")
            .with(Solution, "Tener reglas claras de entrada y esperar setups de calidad."),
            Concept::new(
                "Sesgo de Confirmación",
                "fas fa-search",
                "#8BC34A",
                "Buscar solo información que confirme tu idea.",
                "sesgo",
            )
            .with(Example, "Ignorar señales bajistas porque 'crees' que subirá.")
            .with(Solution, "Buscar activamente evidencia contraria."),
            Concept::new(
                "Disciplina",
                "fas fa-dumbbell",
                "#4CAF50",
                "Seguir tu plan de trading sin importar emociones.",
                "habito",
            )
            .with(Importance, "Clave para la consistencia a largo plazo.")
            .with(Exercise, "¿Estoy operando por mi estrategia o por emoción?"),
        ],
    )
}

fn market_terms() -> Topic {
    topic(
        "Términos del Mercado",
        "fas fa-book",
        "#FF9800",
        "📚",
        "Conoce el lenguaje del trading para entender lo que está pasando.",
        vec![
            Concept::new(
                "Volatilidad",
                "fas fa-bolt",
                "#FF5722",
                "Grado de variación del precio en el tiempo.",
                "metrica",
            )
            .with(Example, "Las altcoins son más volátiles que Bitcoin.")
            .with(Implication, "Mayor volatilidad → mayor riesgo y oportunidad."),
            Concept::new(
                "Liquidez",
                "fas fa-tint",
                "#00BCD4",
                "Facilidad para comprar/vender sin mover el precio.",
                "metrica",
            )
            .with(Example, "BTC es muy líquido; una altcoin pequeña no lo es."),
            Concept::new(
                "Pump and Dump",
                "fas fa-rocket",
                "#F44336",
                "Subida artificial del precio seguida de venta masiva.",
                "manipulacion",
            )
            .with(Signals, "Volumen inusual + redes sociales promocionando.")
            .with(Protection, "Evitar proyectos sin fundamentos."),
            Concept::new(
                "Correlación",
                "fas fa-link",
                "#9C27B0",
                "Cómo se mueven dos activos juntos.",
                "estadistica",
            )
            .with(Example, "BTC y ETH suelen tener correlación alta (+0.8).")
            .with(Usage, "Diversificación efectiva requiere baja correlación."),
            Concept::new(
                "Tendencia (Trend)",
                "fas fa-arrow-trend-up",
                "#4CAF50",
                "Dirección general del precio (alcista, bajista, lateral).",
                "direccion",
            )
            .with(Rule, "La tendencia es tu amiga.")
            .with(Tools, "Medias móviles, máximos/mínimos ascendentes."),
        ],
    )
}
