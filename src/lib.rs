pub mod configuration;

pub mod data {
    pub mod observation;
    pub mod historicalseries;
    pub mod aggregator;
}

pub mod forecast {
    pub mod forecasterror;
    pub mod prediction;
    pub mod comparator;
    pub mod forecastengine;
    pub mod distribution;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod newtonpolynomial;
        }
    }
    pub mod regression {
        pub mod linearregression;
    }
    pub mod round;
}
